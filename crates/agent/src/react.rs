//! The ReAct agent façade.
//!
//! `ReactAgent` owns the conversation history and runs the reason, act,
//! observe loop for each user input. The loop terminates when the model
//! returns a response with no tool calls, or when the iteration limit is
//! reached.

use reagent_config::{AgentConfig, Credentials};
use reagent_core::error::{Error, Result};
use reagent_core::message::{Conversation, Message};
use reagent_core::provider::{Provider, ProviderRequest};
use reagent_core::tool::{ToolCall, ToolRegistry};
use reagent_providers::OpenAiProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::trace::{TraceStep, TurnReport};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that can use tools to \
     answer the user's questions. Answer directly without using tools when the user is \
     making casual conversation.";

/// A ReAct agent: configuration, tool registry, and a mutable ordered log
/// of prior exchanges. One caller per instance: `process_user_input`
/// takes `&mut self`, so concurrent turns are rejected at compile time.
pub struct ReactAgent {
    /// LLM provider (the external reasoning runtime).
    provider: Arc<dyn Provider>,
    /// Tool registry handed to the provider each turn.
    tools: Arc<ToolRegistry>,
    /// Model name.
    model: String,
    /// Temperature.
    temperature: f32,
    /// Default max tokens per response.
    max_tokens: Option<u32>,
    /// Maximum reasoning iterations per turn.
    max_iterations: u32,
    /// Whether to print each reasoning step as it happens.
    verbose: bool,
    /// System prompt prepended to every working conversation.
    system_prompt: String,
    /// Cross-turn history: user and assistant entries only, append-only.
    history: Conversation,
    /// Trace of the most recent completed turn.
    last_turn: Option<TurnReport>,
}

impl std::fmt::Debug for ReactAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactAgent")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_iterations", &self.max_iterations)
            .field("verbose", &self.verbose)
            .field("system_prompt", &self.system_prompt)
            .field("history", &self.history)
            .field("last_turn", &self.last_turn)
            .finish_non_exhaustive()
    }
}

impl ReactAgent {
    /// Create an agent from parts. Used directly by tests; application
    /// code usually goes through [`ReactAgent::from_config`].
    pub fn new(provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>, config: &AgentConfig) -> Self {
        Self {
            provider,
            tools,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_iterations: config.max_iterations,
            verbose: config.verbose,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            history: Conversation::new(),
            last_turn: None,
        }
    }

    /// Wire up an agent from configuration and environment credentials.
    ///
    /// Fails with a configuration error when `OPENAI_API_KEY` is absent.
    /// A missing `TAVILY_API_KEY` is not an error: web search degrades to
    /// its placeholder implementation.
    pub fn from_config(config: &AgentConfig, credentials: &Credentials) -> Result<Self> {
        let api_key = credentials.require_openai_key().map_err(|e| Error::Config {
            message: e.to_string(),
        })?;

        let provider = match &config.api_base_url {
            Some(url) => OpenAiProvider::with_base_url(url, api_key)?,
            None => OpenAiProvider::new(api_key)?,
        };

        let tools = reagent_tools::registry(
            config.include_calculator,
            credentials.tavily_api_key.clone(),
        );

        info!(
            model = %config.model,
            tools = ?tools.names(),
            "ReAct agent initialized"
        );

        Ok(Self::new(Arc::new(provider), Arc::new(tools), config))
    }

    /// Override the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// The cross-turn conversation history (user/assistant entries only).
    pub fn history(&self) -> &[Message] {
        &self.history.messages
    }

    /// The reasoning trace of the most recent completed turn.
    pub fn last_turn(&self) -> Option<&TurnReport> {
        self.last_turn.as_ref()
    }

    /// Clear the conversation history.
    pub fn reset_conversation(&mut self) {
        self.history.clear();
        self.last_turn = None;
        info!("Conversation history has been reset");
    }

    /// Process one user input and return the agent's answer.
    ///
    /// On success, exactly one user entry and one assistant entry are
    /// appended to history, in that order. On failure, history is left
    /// untouched, so a retried turn does not duplicate user entries.
    pub async fn process_user_input(&mut self, input: &str) -> Result<String> {
        debug!(chars = input.len(), "Processing user input");

        // Working conversation for this turn: system prompt, prior
        // exchanges, then the new user message. Tool traffic accumulates
        // here and is discarded once the turn completes.
        let mut working = Conversation::new();
        working.push(Message::system(&self.system_prompt));
        for msg in &self.history.messages {
            working.push(msg.clone());
        }
        working.push(Message::user(input));

        let report = self.run_loop(&mut working).await?;
        let answer = report.answer.clone();

        self.history.push(Message::user(input));
        self.history.push(Message::assistant(&answer));
        self.last_turn = Some(report);

        Ok(answer)
    }

    /// Execute the reason, act, observe loop over a working conversation.
    async fn run_loop(&self, working: &mut Conversation) -> Result<TurnReport> {
        let tool_defs = self.tools.definitions();
        let mut trace: Vec<TraceStep> = Vec::new();
        let mut iterations = 0usize;
        let mut tool_calls_made = 0usize;

        while iterations < self.max_iterations as usize {
            iterations += 1;
            debug!(iteration = iterations, "ReAct iteration");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: working.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_defs.clone(),
            };

            let response = self.provider.complete(request).await?;

            if !response.message.content.is_empty() {
                self.record(&mut trace, TraceStep::thought(&response.message.content));
            }

            // No tool calls means the model produced its final answer.
            if response.message.tool_calls.is_empty() {
                let answer = response.message.content.clone();
                working.push(response.message);

                info!(iterations, tool_calls_made, "ReAct loop completed");

                return Ok(TurnReport {
                    answer,
                    trace,
                    iterations,
                    tool_calls_made,
                });
            }

            let tool_calls = response.message.tool_calls.clone();
            working.push(response.message);

            for tc in &tool_calls {
                tool_calls_made += 1;
                self.record(
                    &mut trace,
                    TraceStep::action(format!("{}({})", tc.name, tc.arguments)),
                );

                let call = ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
                };

                // Tool failures become observations for the model to react
                // to, never loop failures.
                let observation = match self.tools.execute(&call).await {
                    Ok(result) => result.output,
                    Err(e) => format!("Error: {e}"),
                };

                self.record(&mut trace, TraceStep::observation(&observation));
                working.push(Message::tool_result(&tc.id, &observation));
            }
        }

        warn!(
            max_iterations = self.max_iterations,
            "ReAct loop hit the iteration limit"
        );

        Ok(TurnReport {
            answer: "I've reached the maximum number of reasoning iterations. \
                     Here's what I found so far."
                .into(),
            trace,
            iterations,
            tool_calls_made,
        })
    }

    /// Append to the trace; in verbose mode also print the step.
    fn record(&self, trace: &mut Vec<TraceStep>, step: TraceStep) {
        debug!(step = %step, "Trace");
        if self.verbose {
            println!("{step}");
        }
        trace.push(step);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::trace::TraceKind;
    use reagent_core::message::Role;

    fn agent_with(provider: Arc<SequentialMockProvider>) -> ReactAgent {
        let config = AgentConfig {
            include_calculator: true,
            ..AgentConfig::default()
        };
        let tools = Arc::new(reagent_tools::registry(true, None));
        ReactAgent::new(provider, tools, &config)
    }

    #[tokio::test]
    async fn simple_text_response() {
        let provider = Arc::new(SequentialMockProvider::single_text("Final answer"));
        let mut agent = agent_with(provider);

        let answer = agent.process_user_input("Hello").await.unwrap();
        assert_eq!(answer, "Final answer");

        let report = agent.last_turn().unwrap();
        assert_eq!(report.iterations, 1);
        assert_eq!(report.tool_calls_made, 0);
    }

    #[tokio::test]
    async fn history_appends_one_user_and_one_assistant_entry() {
        let provider = Arc::new(SequentialMockProvider::new(vec![
            make_text_response("first"),
            make_text_response("second"),
        ]));
        let mut agent = agent_with(provider);

        agent.process_user_input("a").await.unwrap();
        agent.process_user_input("b").await.unwrap();

        let history = agent.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[2].role, Role::User);
        assert_eq!(history[3].role, Role::Assistant);
        assert_eq!(history[2].content, "b");
        assert_eq!(history[3].content, "second");
    }

    #[tokio::test]
    async fn tool_traffic_stays_out_of_history() {
        let tool_calls = vec![make_tool_call(
            "calculator",
            serde_json::json!({"expression": "2 + 3"}),
        )];
        let provider = Arc::new(SequentialMockProvider::tool_then_answer(
            tool_calls,
            "I need to calculate 2 + 3",
            "The result is 5",
        ));
        let mut agent = agent_with(provider);

        let answer = agent.process_user_input("What is 2+3?").await.unwrap();
        assert_eq!(answer, "The result is 5");

        // History holds only the user/assistant pair, no tool messages.
        let history = agent.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn thought_action_observation_trace() {
        let tool_calls = vec![make_tool_call(
            "calculator",
            serde_json::json!({"expression": "2 + 3"}),
        )];
        let provider = Arc::new(SequentialMockProvider::tool_then_answer(
            tool_calls,
            "I need to calculate 2 + 3",
            "The result is 5",
        ));
        let mut agent = agent_with(provider);

        agent.process_user_input("What is 2+3?").await.unwrap();

        let report = agent.last_turn().unwrap();
        assert_eq!(report.tool_calls_made, 1);
        assert!(report.trace.len() >= 3);
        assert_eq!(report.trace[0].kind, TraceKind::Thought);
        assert!(report.trace[0].content.contains("calculate"));
        assert_eq!(report.trace[1].kind, TraceKind::Action);
        assert!(report.trace[1].content.contains("calculator"));
        assert_eq!(report.trace[2].kind, TraceKind::Observation);
        assert!(report.trace[2].content.contains("5"));
    }

    #[tokio::test]
    async fn reset_empties_history_and_next_turn_starts_fresh() {
        let provider = Arc::new(SequentialMockProvider::new(vec![
            make_text_response("one"),
            make_text_response("two"),
        ]));
        let mut agent = agent_with(provider.clone());

        agent.process_user_input("first question").await.unwrap();
        agent.reset_conversation();
        assert!(agent.history().is_empty());

        agent.process_user_input("x").await.unwrap();

        // The request after reset contains only the system prompt plus the
        // single new user message.
        let requests = provider.requests();
        let after_reset = requests.last().unwrap();
        assert_eq!(after_reset.messages.len(), 2);
        assert_eq!(after_reset.messages[0].role, Role::System);
        assert_eq!(after_reset.messages[1].role, Role::User);
        assert_eq!(after_reset.messages[1].content, "x");
    }

    #[tokio::test]
    async fn unknown_tool_becomes_observation() {
        let tool_calls = vec![make_tool_call("no_such_tool", serde_json::json!({}))];
        let provider = Arc::new(SequentialMockProvider::tool_then_answer(
            tool_calls,
            "Trying a tool",
            "Recovered",
        ));
        let mut agent = agent_with(provider);

        let answer = agent.process_user_input("go").await.unwrap();
        assert_eq!(answer, "Recovered");

        let report = agent.last_turn().unwrap();
        let obs = report
            .trace
            .iter()
            .find(|s| s.kind == TraceKind::Observation)
            .unwrap();
        assert!(obs.content.contains("Error"));
        assert!(obs.content.contains("no_such_tool"));
    }

    #[tokio::test]
    async fn upstream_failure_leaves_history_untouched() {
        let provider = Arc::new(SequentialMockProvider::always_failing());
        let mut agent = agent_with(provider);

        let err = agent.process_user_input("hello").await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert!(agent.history().is_empty());
    }

    #[tokio::test]
    async fn max_iterations_respected() {
        // Provider always returns tool calls, never a final answer.
        let responses: Vec<_> = (0..5)
            .map(|_| {
                make_tool_call_response(
                    vec![make_tool_call(
                        "calculator",
                        serde_json::json!({"expression": "1+1"}),
                    )],
                    "Thinking...",
                )
            })
            .collect();
        let provider = Arc::new(SequentialMockProvider::new(responses));

        let config = AgentConfig {
            include_calculator: true,
            max_iterations: 3,
            ..AgentConfig::default()
        };
        let tools = Arc::new(reagent_tools::registry(true, None));
        let mut agent = ReactAgent::new(provider, tools, &config);

        let answer = agent.process_user_input("loop forever").await.unwrap();
        assert!(answer.contains("maximum"));
        assert_eq!(agent.last_turn().unwrap().iterations, 3);
    }

    #[tokio::test]
    async fn from_config_requires_model_key() {
        let config = AgentConfig::default();
        let credentials = Credentials {
            openai_api_key: None,
            tavily_api_key: None,
        };
        let err = ReactAgent::from_config(&config, &credentials).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
