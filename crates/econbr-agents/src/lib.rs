pub mod agent;
pub mod chat;
pub mod classifier;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod router;

pub mod test_support;

pub use agent::{AssistantAgent, ReactAgent};
pub use chat::{ChatClient, ChatModel};
pub use classifier::QueryClassifier;
pub use error::AgentError;
pub use orchestrator::{Orchestrator, RoutedAnswer};
pub use router::{Router, RoutingDecision};
