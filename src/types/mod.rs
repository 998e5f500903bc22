pub use self::{
    network::Network, platform::Platform, pool_day_data::PoolDayData,
};

mod network;
mod platform;
mod pool_day_data;
