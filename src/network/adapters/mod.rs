pub mod json;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub distance: u64,
}

pub trait NetworkAdapter {
    type Error;

    /// Returns every station name; duplicates are allowed and collapse.
    fn stations(&self) -> Result<Vec<String>, Self::Error>;

    /// Returns routes between stations listed by `stations`.
    fn routes(&self) -> Result<Vec<Route>, Self::Error>;
}
