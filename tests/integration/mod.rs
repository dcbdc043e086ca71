//! Integration tests for the taskgraph indexer and CLI

mod cli_workflow;
mod exclusion;
mod hierarchy_properties;
mod store_rebuild;
