//! Asana pull request linker.
//!
//! This crate implements a GitHub Action that reads a pull request
//! description, finds the Asana task links that follow a configured trigger
//! phrase, moves each task into its target sections and comments a link back
//! to the pull request.
//!
//! # Architecture
//!
//! The linker follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and parsing with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the task tracker
//! - **Adapters**: Asana REST and in-memory implementations of the port
//! - **Services**: Reconciliation, commenting and per-run orchestration
//!
//! # Modules
//!
//! - [`linking`]: Link extraction, reconciliation and commenting
//! - [`action`]: Input validation, event loading and logging setup

pub mod action;
pub mod linking;
