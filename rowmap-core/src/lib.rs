mod as_value;
mod cache;
mod coerce;
mod cursor;
mod descriptor;
mod error;
mod hook;
mod mapper;
mod reflect;
mod row;
mod snapshot;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use cache::*;
pub use coerce::*;
pub use cursor::*;
pub use descriptor::*;
pub use error::*;
pub use hook::*;
pub use mapper::*;
pub use reflect::*;
pub use row::*;
pub use snapshot::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
