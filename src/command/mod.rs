//! Command / Event Kernel
//!
//! Every state-changing operation on the index is a [`Command`]. Executing
//! a command consumes it and yields exactly one [`Event`] or the command's
//! own error. The kernel keeps no state across executions: retry,
//! idempotence and persistence of the returned event belong to the caller.
//!
//! ```text
//! Pending ──exec──▶ Succeeded(event)
//!            └────▶ Failed(error)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use chain_indexing::command::{execute, CreateTransaction};
//!
//! let event = execute(CreateTransaction::new(block_height, params))?;
//! store.append(event.to_json()?);
//! ```

pub mod create_transaction;
pub mod event;

pub use create_transaction::{
    CreateTransaction, CreateTransactionError, CreateTransactionParams, TransactionCreated,
};
pub use event::EventBase;

use crate::{log_debug, log_warn};
use std::error::Error as StdError;
use std::fmt;

const MODULE: &str = "command";

/// Boxed error surfaced by type-erased commands
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Immutable record of something that happened on chain
pub trait Event: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Payload schema version
    fn version(&self) -> u32;

    fn block_height(&self) -> u64;

    /// JSON payload as stored by the event store
    fn to_json(&self) -> Result<String, serde_json::Error>;
}

/// Identity of a command, used for logging and routing only
pub trait CommandInfo {
    fn name(&self) -> &str;

    /// Payload schema version, lets the same name evolve
    fn version(&self) -> u32;
}

/// A unit of intended change that produces one event
pub trait Command: CommandInfo {
    type Event: Event;
    type Error: StdError + Send + Sync + 'static;

    /// Process the command data and return the resulting event
    ///
    /// Must be a pure function of the command: no I/O, no retries, no
    /// caching.
    fn exec(self) -> Result<Self::Event, Self::Error>;
}

/// Object-safe form of [`Command`] for heterogeneous queues
pub trait BoxedCommand: CommandInfo + Send {
    fn exec_boxed(self: Box<Self>) -> Result<Box<dyn Event>, BoxedError>;
}

impl<C> BoxedCommand for C
where
    C: Command + Send,
    C::Event: 'static,
{
    fn exec_boxed(self: Box<Self>) -> Result<Box<dyn Event>, BoxedError> {
        match (*self).exec() {
            Ok(event) => Ok(Box::new(event)),
            Err(e) => Err(Box::new(e)),
        }
    }
}

/// Lifecycle of a single command execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Pending,
    Succeeded,
    Failed,
}

impl CommandState {
    pub fn of<E, Err>(result: &Result<E, Err>) -> Self {
        match result {
            Ok(_) => CommandState::Succeeded,
            Err(_) => CommandState::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, CommandState::Pending)
    }
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandState::Pending => write!(f, "pending"),
            CommandState::Succeeded => write!(f, "succeeded"),
            CommandState::Failed => write!(f, "failed"),
        }
    }
}

/// Execute a command, returning its event or its error unchanged
pub fn execute<C: Command>(command: C) -> Result<C::Event, C::Error> {
    let name = command.name().to_string();
    let version = command.version();
    log_debug!(MODULE, "Executing command", command = name, version = version, state = CommandState::Pending);

    let result = command.exec();
    match &result {
        Ok(event) => log_succeeded(&name, version, event),
        Err(e) => log_failed(&name, version, e),
    }
    result
}

/// Execute a type-erased command
pub fn execute_boxed(command: Box<dyn BoxedCommand>) -> Result<Box<dyn Event>, BoxedError> {
    let name = command.name().to_string();
    let version = command.version();
    log_debug!(MODULE, "Executing command", command = name, version = version, state = CommandState::Pending);

    let result = command.exec_boxed();
    match &result {
        Ok(event) => log_succeeded(&name, version, event.as_ref()),
        Err(e) => log_failed(&name, version, e.as_ref()),
    }
    result
}

fn log_succeeded<E: Event + ?Sized>(name: &str, version: u32, event: &E) {
    log_debug!(
        MODULE,
        "Command executed",
        command = name,
        version = version,
        state = CommandState::Succeeded,
        event = event.name(),
        height = event.block_height(),
    );
}

fn log_failed(name: &str, version: u32, error: &dyn StdError) {
    log_warn!(
        MODULE,
        "Command execution failed",
        command = name,
        version = version,
        state = CommandState::Failed,
        error = error,
    );
}
