pub use self::{
    pool::{Pool, Token},
    pool_metric::PoolMetric,
};

mod pool;
mod pool_metric;
