//! The reagent agent: a ReAct (reason, act, observe) loop behind a
//! thin conversational façade.
//!
//! One turn works like this:
//!
//! 1. **Receive** a user message via `process_user_input`
//! 2. **Assemble** the working conversation (system prompt + history + input)
//! 3. **Send to the LLM** via the configured provider, with tool definitions
//! 4. **If tool calls**: execute tools, append results, loop back to step 3
//! 5. **If text**: that is the final answer; record the turn in history
//!
//! The façade history records exactly one user and one assistant entry per
//! successful turn; intermediate tool traffic stays in the per-turn working
//! conversation.

pub mod react;
pub mod trace;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use react::ReactAgent;
pub use trace::{TraceKind, TraceStep, TurnReport};
