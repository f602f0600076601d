//! Terminal chat front-end: the controller state machine, the relay
//! clients it talks to, and the ratatui rendering on top.

pub mod controller;
pub mod input;
pub mod relay_client;
pub mod tui;
pub mod ui;
