use std::path::Path;

use anyhow::Context;

use crate::network::NetworkGraph;

impl NetworkGraph {
    /// Loads a graph previously written by [`NetworkGraph::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("reading snapshot {path:?}"))?;
        let graph: Self = postcard::from_bytes(&bytes)
            .with_context(|| format!("decoding snapshot {path:?}"))?;

        tracing::info!(
            path = %path.display(),
            stations = graph.station_count(),
            "loaded network snapshot"
        );
        Ok(graph)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = postcard::to_stdvec(self)?;
        std::fs::write(path, &bytes).with_context(|| format!("writing snapshot {path:?}"))?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved network snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::Path};

    use serde::Serialize;

    use crate::network::{NetworkGraph, adapters::json::JsonAdapter};

    #[derive(Serialize)]
    struct Adjacency {
        stations: BTreeMap<&'static str, BTreeMap<&'static str, u64>>,
    }

    /// Writes a snapshot from raw directed entries, bypassing `add_route`.
    fn write_adjacency(
        path: &Path,
        stations: &[&'static str],
        entries: &[(&'static str, &'static str, u64)],
    ) {
        let mut adjacency: BTreeMap<_, BTreeMap<_, _>> =
            stations.iter().map(|&s| (s, BTreeMap::new())).collect();
        for &(from, to, distance) in entries {
            adjacency.entry(from).or_default().insert(to, distance);
        }

        let bytes = postcard::to_stdvec(&Adjacency {
            stations: adjacency,
        })
        .unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn snapshot_preserves_the_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metro.bin");

        let graph = NetworkGraph::from_adapter(&JsonAdapter::builtin().unwrap()).unwrap();
        graph.save(&path).unwrap();

        let loaded = NetworkGraph::load(&path).unwrap();
        assert_eq!(loaded, graph);
        assert_eq!(loaded.shortest_distance("Station D", "Station A"), Some(14));
    }

    #[test]
    fn garbage_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bin");
        std::fs::write(&path, [0xff, 0xff, 0xff]).unwrap();

        assert!(NetworkGraph::load(&path).is_err());
    }

    #[test]
    fn snapshot_must_describe_a_valid_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.bin");

        let invalid: [&[(&'static str, &'static str, u64)]; 4] = [
            &[("A", "Z", 3)],
            &[("A", "B", 3), ("B", "A", 4)],
            &[("A", "B", 3)],
            &[("A", "B", 0), ("B", "A", 0)],
        ];

        for entries in invalid {
            write_adjacency(&path, &["A", "B"], entries);
            assert!(NetworkGraph::load(&path).is_err(), "{entries:?}");
        }

        write_adjacency(&path, &["A", "B"], &[("A", "B", 3), ("B", "A", 3)]);
        let graph = NetworkGraph::load(&path).unwrap();
        assert_eq!(graph.shortest_distance("A", "A"), Some(0));
        assert_eq!(graph.shortest_distance("B", "A"), Some(3));
    }
}
