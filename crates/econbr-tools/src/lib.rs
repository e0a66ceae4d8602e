pub mod bcb;
pub mod error;
pub mod ibge;
pub mod python;
pub mod search;
pub mod tool;
pub mod validate;
pub mod weather;

pub use bcb::BcbSeriesTool;
pub use error::ToolError;
pub use ibge::IbgeDataTool;
pub use python::PythonReplTool;
pub use search::WebSearchTool;
pub use tool::{toolset_for, Tool};
pub use weather::WeatherTool;
