use std::{
    cmp::Reverse,
    collections::{BTreeMap, BinaryHeap, HashMap, HashSet},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::adapters::NetworkAdapter;

pub mod adapters;
pub mod snapshot;

type Adjacency = BTreeMap<String, BTreeMap<String, u64>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("unknown station: {0}")]
    UnknownStation(String),

    #[error("route {from} - {to} must have a positive distance")]
    InvalidDistance { from: String, to: String },

    #[error("route from {0} to itself")]
    SelfLoop(String),

    #[error("route {from} - {to} differs from its reverse")]
    AsymmetricRoute { from: String, to: String },
}

/// A shortest route through the network, endpoints included.
///
/// Route distances are `u64`; a path sum over them always fits in `u128`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Journey {
    pub stations: Vec<String>,
    pub distance: u128,
}

/// Undirected weighted graph of stations. Every route is stored in both
/// directions with the same weight.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct NetworkGraph {
    stations: Adjacency,
}

/// Serialized form of [`NetworkGraph`], checked before it becomes a graph.
#[derive(Deserialize)]
struct RawNetwork {
    stations: Adjacency,
}

impl TryFrom<RawNetwork> for NetworkGraph {
    type Error = NetworkError;

    fn try_from(raw: RawNetwork) -> Result<Self, Self::Error> {
        let mut graph = Self::new();
        for station in raw.stations.keys() {
            graph.add_station(station.clone());
        }

        for (from, adjacent) in &raw.stations {
            for (to, &distance) in adjacent {
                graph.add_route(from, to, distance)?;

                let reverse = raw.stations.get(to).and_then(|back| back.get(from));
                if reverse != Some(&distance) {
                    return Err(NetworkError::AsymmetricRoute {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }

        Ok(graph)
    }
}

impl NetworkGraph {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_adapter<A: NetworkAdapter>(adapter: &A) -> Result<Self, A::Error>
    where
        A::Error: From<NetworkError>,
    {
        let mut graph = Self::new();

        for station in adapter.stations()? {
            graph.add_station(station);
        }

        for route in adapter.routes()? {
            graph.add_route(&route.from, &route.to, route.distance)?;
        }

        tracing::info!(
            stations = graph.station_count(),
            routes = graph.route_count(),
            "built network graph"
        );

        Ok(graph)
    }

    /// Registers a station. Adding an existing name is a no-op.
    pub fn add_station(&mut self, name: impl Into<String>) {
        self.stations.entry(name.into()).or_default();
    }

    /// Sets the distance between two registered stations, replacing any
    /// earlier distance for the pair.
    pub fn add_route(&mut self, a: &str, b: &str, distance: u64) -> Result<(), NetworkError> {
        for station in [a, b] {
            if !self.contains(station) {
                return Err(NetworkError::UnknownStation(station.to_owned()));
            }
        }

        if a == b {
            return Err(NetworkError::SelfLoop(a.to_owned()));
        }

        if distance == 0 {
            return Err(NetworkError::InvalidDistance {
                from: a.to_owned(),
                to: b.to_owned(),
            });
        }

        for (from, to) in [(a, b), (b, a)] {
            if let Some(adjacent) = self.stations.get_mut(from) {
                adjacent.insert(to.to_owned(), distance);
            }
        }

        Ok(())
    }

    pub fn contains(&self, station: &str) -> bool {
        self.stations.contains_key(station)
    }

    /// Station names in ascending order.
    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.stations.keys().map(String::as_str)
    }

    pub fn neighbours(&self, station: &str) -> impl Iterator<Item = (&str, u64)> {
        self.stations
            .get(station)
            .into_iter()
            .flat_map(|adjacent| adjacent.iter().map(|(s, &d)| (s.as_str(), d)))
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn route_count(&self) -> usize {
        self.stations.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Length of the shortest path, or `None` when the destination cannot
    /// be reached (including when either station is unknown).
    pub fn shortest_distance(&self, source: &str, destination: &str) -> Option<u128> {
        self.dijkstra(source)?.distance_to(destination)
    }

    pub fn shortest_route(&self, source: &str, destination: &str) -> Option<Journey> {
        let search = self.dijkstra(source)?;
        let distance = search.distance_to(destination)?;

        let mut stations = vec![destination.to_owned()];
        let mut current = destination;
        while let Some(&previous) = search.previous.get(current) {
            stations.push(previous.to_owned());
            current = previous;
        }
        stations.reverse();

        Some(Journey { stations, distance })
    }

    fn dijkstra<'a>(&'a self, source: &str) -> Option<ShortestPaths<'a>> {
        let (source, _) = self.stations.get_key_value(source)?;
        let source = source.as_str();

        // stations missing from `distances` have not been reached
        let mut distances: HashMap<&str, u128> = HashMap::from([(source, 0)]);
        let mut previous = HashMap::new();
        let mut finalized = HashSet::new();
        let mut frontier: BinaryHeap<Reverse<(u128, &str)>> = BinaryHeap::new();

        frontier.push(Reverse((0, source)));

        while let Some(Reverse((distance, station))) = frontier.pop() {
            // stale entry left behind by a later relaxation
            if !finalized.insert(station) {
                continue;
            }

            for (neighbour, weight) in self.neighbours(station) {
                let candidate = distance + u128::from(weight);
                let improves = distances
                    .get(neighbour)
                    .is_none_or(|&best| candidate < best);

                if improves {
                    distances.insert(neighbour, candidate);
                    previous.insert(neighbour, station);
                    frontier.push(Reverse((candidate, neighbour)));
                }
            }
        }

        Some(ShortestPaths {
            distances,
            previous,
        })
    }
}

struct ShortestPaths<'a> {
    distances: HashMap<&'a str, u128>,
    previous: HashMap<&'a str, &'a str>,
}

impl ShortestPaths<'_> {
    fn distance_to(&self, station: &str) -> Option<u128> {
        self.distances.get(station).copied()
    }
}
