//! Command dispatch and session state.
//!
//! [`CommandDispatcher`] is the engine of the shell: it owns the command
//! registry and the session handle, turns one input line at a time into a
//! validated action against the SIP collaborator, and contains every
//! failure. No handler error escapes [`CommandDispatcher::run`]; the line
//! loop only ever sees an outcome.
//!
//! The registry is an ordered list paired with a name lookup map: `help`
//! iterates the list in registration order, dispatch resolves names in O(1),
//! and the two can never disagree about which commands exist.

pub mod tokenizer;

use std::collections::HashMap;

use crate::config::SessionConfig;
use crate::error::SipshError;
use crate::sip::{Connector, SipSession};
use crate::ui::UserInterface;

pub use tokenizer::tokenize;

/// Result of one handler execution.
///
/// Carries an explicit outcome flag plus an optional payload (typically the
/// raw response text), so callers and tests can assert on content rather
/// than truthiness.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Whether the command succeeded.
    pub success: bool,

    /// Raw response or other payload, when the command produced one.
    pub detail: Option<String>,
}

impl CommandOutcome {
    /// A successful outcome with no payload.
    pub fn success() -> Self {
        Self {
            success: true,
            detail: None,
        }
    }

    /// A failed outcome with no payload.
    pub fn failure() -> Self {
        Self {
            success: false,
            detail: None,
        }
    }

    /// Attach a payload.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Result of dispatching one input line.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Blank or comment-only line; nothing happened.
    Noop,

    /// The first token matched no registered command.
    NotFound(String),

    /// The handler asked to leave the shell.
    Exit,

    /// A handler executed.
    Completed(CommandOutcome),
}

impl RunOutcome {
    /// Whether this outcome counts as a success (no-ops do).
    pub fn succeeded(&self) -> bool {
        match self {
            Self::Noop | Self::Exit => true,
            Self::NotFound(_) => false,
            Self::Completed(outcome) => outcome.success,
        }
    }
}

/// Which handler a registry entry routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Help,
    Echo,
    Exit,
    Connect,
    Login,
    Status,
    Start,
    PatronInfo,
}

/// One registry entry.
#[derive(Debug, Clone, Copy)]
struct CommandSpec {
    name: &'static str,
    description: &'static str,
    kind: CommandKind,
}

/// Executes one command line at a time against the SIP collaborator.
pub struct CommandDispatcher {
    config: SessionConfig,
    connector: Box<dyn Connector>,
    session: Option<Box<dyn SipSession>>,
    registry: Vec<CommandSpec>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandDispatcher {
    /// Create a dispatcher with an empty session handle.
    pub fn new(config: SessionConfig, connector: Box<dyn Connector>) -> Self {
        let mut dispatcher = Self {
            config,
            connector,
            session: None,
            registry: Vec::new(),
            lookup: HashMap::new(),
        };

        // Registration order is the order `help` displays, and a contract.
        dispatcher.register("help", "Display help message", CommandKind::Help);
        dispatcher.register("echo", "Echo command with arguments", CommandKind::Echo);
        dispatcher.register("exit", "Exit shell", CommandKind::Exit);
        dispatcher.register("quit", "Exit shell", CommandKind::Exit);
        dispatcher.register(
            "connect",
            "Open a network connection to the SIP server",
            CommandKind::Connect,
        );
        dispatcher.register("login", "Send a 93 Login request", CommandKind::Login);
        dispatcher.register(
            "status",
            "Send a 99 SC Status request message",
            CommandKind::Status,
        );
        dispatcher.register(
            "start",
            "Shortcut for a combination of \"connect\", \"login\", and \"status\" commands",
            CommandKind::Start,
        );
        dispatcher.register(
            "patron-info",
            "Send a 63 Patron Information Request message",
            CommandKind::PatronInfo,
        );
        dispatcher
    }

    fn register(&mut self, name: &'static str, description: &'static str, kind: CommandKind) {
        self.lookup.insert(name, self.registry.len());
        self.registry.push(CommandSpec {
            name,
            description,
            kind,
        });
    }

    /// Registered command names, in registration order.
    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.iter().map(|spec| spec.name).collect()
    }

    /// Whether a successful connect is currently live.
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Execute one input line.
    ///
    /// Blank and comment-only lines are no-ops; an unknown first token is
    /// reported to the error stream and the loop stays usable. Everything a
    /// handler can get wrong is contained here and comes back as an outcome.
    pub fn run(&mut self, line: &str, ui: &mut dyn UserInterface) -> RunOutcome {
        let tokens = tokenize(line);
        let Some((command, args)) = tokens.split_first() else {
            return RunOutcome::Noop;
        };

        let Some(&index) = self.lookup.get(command.as_str()) else {
            ui.error(
                &SipshError::CommandNotFound {
                    name: command.clone(),
                }
                .to_string(),
            );
            return RunOutcome::NotFound(command.clone());
        };

        match self.registry[index].kind {
            CommandKind::Exit => {
                ui.message("Goodbye");
                RunOutcome::Exit
            }
            CommandKind::Help => RunOutcome::Completed(self.help(ui)),
            CommandKind::Echo => RunOutcome::Completed(self.echo(args, ui)),
            CommandKind::Connect => RunOutcome::Completed(self.connect(ui)),
            CommandKind::Login => RunOutcome::Completed(self.login(ui)),
            CommandKind::Status => RunOutcome::Completed(self.status(ui)),
            CommandKind::Start => RunOutcome::Completed(self.start(ui)),
            CommandKind::PatronInfo => RunOutcome::Completed(self.patron_info(args, ui)),
        }
    }

    fn help(&self, ui: &mut dyn UserInterface) -> CommandOutcome {
        ui.message("Commands:");
        for spec in &self.registry {
            ui.message(&format!("  {} - {}", spec.name, spec.description));
        }
        CommandOutcome::success()
    }

    fn echo(&self, args: &[String], ui: &mut dyn UserInterface) -> CommandOutcome {
        ui.message(&format!("echo args={:?}", args));
        CommandOutcome::success()
    }

    fn connect(&mut self, ui: &mut dyn UserInterface) -> CommandOutcome {
        // A failed attempt must not leave a stale session behind.
        self.session = None;

        let attempt = self
            .config
            .port
            .parse::<u16>()
            .map_err(|e| SipshError::Network {
                message: format!("invalid port {:?}: {}", self.config.port, e),
            })
            .and_then(|port| {
                self.connector
                    .connect(&self.config.server, port, &self.config.institution)
            });

        match attempt {
            Ok(session) => {
                self.session = Some(session);
                ui.success("Connect OK");
                CommandOutcome::success()
            }
            Err(e) => {
                tracing::debug!(
                    "connect to {}:{} failed: {}",
                    self.config.server,
                    self.config.port,
                    e
                );
                let mut msg = format!(
                    "Unable to connect to server {} port {}",
                    self.config.server, self.config.port
                );
                if self.config.verbose_connect_errors {
                    msg = format!("{} ({})", msg, e);
                }
                ui.error(&msg);
                CommandOutcome::failure()
            }
        }
    }

    fn login(&mut self, ui: &mut dyn UserInterface) -> CommandOutcome {
        let Some(session) = self.session.as_mut() else {
            ui.error(&SipshError::NotConnected.to_string());
            return CommandOutcome::failure();
        };

        match session.login(
            &self.config.username,
            &self.config.password,
            &self.config.location_code,
        ) {
            Ok(true) => {
                ui.success("Login OK");
                CommandOutcome::success()
            }
            Ok(false) => {
                ui.error("Login Failed");
                CommandOutcome::failure()
            }
            Err(e) => {
                ui.error(&format!("Login request failed: {}", e));
                CommandOutcome::failure()
            }
        }
    }

    fn status(&mut self, ui: &mut dyn UserInterface) -> CommandOutcome {
        let Some(session) = self.session.as_mut() else {
            ui.error(&SipshError::NotConnected.to_string());
            return CommandOutcome::failure();
        };

        match session.sc_status() {
            Ok(response) => {
                let raw = response.to_string();
                if response.fixed_field("online_status") == Some("Y") {
                    ui.success("Server is online");
                    CommandOutcome::success().with_detail(raw)
                } else {
                    ui.error("Server is NOT online");
                    ui.message(&raw);
                    CommandOutcome::failure().with_detail(raw)
                }
            }
            Err(e) => {
                ui.error(&format!("Status request failed: {}", e));
                CommandOutcome::failure()
            }
        }
    }

    /// connect AND login AND status, short-circuiting on the first failure.
    fn start(&mut self, ui: &mut dyn UserInterface) -> CommandOutcome {
        let connected = self.connect(ui);
        if !connected.success {
            return connected;
        }
        let logged_in = self.login(ui);
        if !logged_in.success {
            return logged_in;
        }
        self.status(ui)
    }

    fn patron_info(&mut self, args: &[String], ui: &mut dyn UserInterface) -> CommandOutcome {
        let Some(barcode) = args.first() else {
            ui.error("Patron barcode required");
            return CommandOutcome::failure();
        };

        let Some(session) = self.session.as_mut() else {
            ui.error(&SipshError::NotConnected.to_string());
            return CommandOutcome::failure();
        };

        match session.patron_info(barcode) {
            // Success is about the exchange, not the server's verdict; the
            // operator reads the raw response.
            Ok(response) => {
                let raw = response.to_string();
                ui.message(&raw);
                CommandOutcome::success().with_detail(raw)
            }
            Err(e) => {
                ui.error(&format!("Patron information request failed: {}", e));
                CommandOutcome::failure()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sip::MockConnector;
    use crate::ui::MockUI;

    fn config() -> SessionConfig {
        SessionConfig {
            server: "sip.example.org".into(),
            port: "6001".into(),
            institution: "main".into(),
            username: "scuser".into(),
            password: "scpass".into(),
            location_code: "desk".into(),
            verbose_connect_errors: false,
        }
    }

    fn dispatcher(connector: MockConnector) -> CommandDispatcher {
        CommandDispatcher::new(config(), Box::new(connector))
    }

    #[test]
    fn registration_order_is_the_contract() {
        let d = dispatcher(MockConnector::new());
        assert_eq!(
            d.command_names(),
            [
                "help",
                "echo",
                "exit",
                "quit",
                "connect",
                "login",
                "status",
                "start",
                "patron-info"
            ]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_noops() {
        let mut d = dispatcher(MockConnector::new());
        let mut ui = MockUI::new();

        assert!(matches!(d.run("", &mut ui), RunOutcome::Noop));
        assert!(matches!(d.run("   ", &mut ui), RunOutcome::Noop));
        assert!(matches!(d.run("# comment", &mut ui), RunOutcome::Noop));
        assert!(ui.transcript().is_empty());
    }

    #[test]
    fn unknown_command_is_reported_not_raised() {
        let mut d = dispatcher(MockConnector::new());
        let mut ui = MockUI::new();

        let outcome = d.run("bogus", &mut ui);
        assert!(matches!(outcome, RunOutcome::NotFound(ref t) if t == "bogus"));
        assert!(ui.has_error("Command not found: bogus"));

        // The loop is still usable afterward.
        assert!(d.run("help", &mut ui).succeeded());
    }

    #[test]
    fn help_lists_commands_in_registration_order() {
        let mut d = dispatcher(MockConnector::new());
        let mut ui = MockUI::new();

        assert!(d.run("help", &mut ui).succeeded());

        let listed: Vec<&str> = ui
            .messages()
            .iter()
            .skip(1) // "Commands:" banner
            .map(|line| line.trim_start().split(" - ").next().unwrap())
            .collect();
        assert_eq!(
            listed,
            [
                "help",
                "echo",
                "exit",
                "quit",
                "connect",
                "login",
                "status",
                "start",
                "patron-info"
            ]
        );
    }

    #[test]
    fn echo_prints_arguments_verbatim() {
        let mut d = dispatcher(MockConnector::new());
        let mut ui = MockUI::new();

        assert!(d.run("echo hi there", &mut ui).succeeded());
        assert_eq!(ui.messages(), &[r#"echo args=["hi", "there"]"#]);
    }

    #[test]
    fn echo_unquotes_arguments() {
        let mut d = dispatcher(MockConnector::new());
        let mut ui = MockUI::new();

        d.run("echo a 'b c' d", &mut ui);
        assert_eq!(ui.messages(), &[r#"echo args=["a", "b c", "d"]"#]);
    }

    #[test]
    fn exit_and_quit_say_goodbye() {
        for command in ["exit", "quit"] {
            let mut d = dispatcher(MockConnector::new());
            let mut ui = MockUI::new();
            assert!(matches!(d.run(command, &mut ui), RunOutcome::Exit));
            assert!(ui.has_message("Goodbye"));
        }
    }

    #[test]
    fn connect_success_replaces_the_session() {
        let mut d = dispatcher(MockConnector::new());
        let mut ui = MockUI::new();

        assert!(!d.is_connected());
        assert!(d.run("connect", &mut ui).succeeded());
        assert!(d.is_connected());
        assert!(ui.has_success("Connect OK"));
    }

    #[test]
    fn failed_connect_reports_generically_and_clears_the_session() {
        let connector = MockConnector::new().refusing_connect();
        let mut d = dispatcher(connector);
        let mut ui = MockUI::new();

        let outcome = d.run("connect", &mut ui);
        assert!(!outcome.succeeded());
        assert!(!d.is_connected());
        assert!(ui.has_error("Unable to connect to server sip.example.org port 6001"));
        // The cause stays out of the operator message by default.
        assert!(!ui.errors()[0].contains("refused"));
    }

    #[test]
    fn verbose_connect_errors_appends_the_cause() {
        let mut config = config();
        config.verbose_connect_errors = true;
        let mut d =
            CommandDispatcher::new(config, Box::new(MockConnector::new().refusing_connect()));
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        assert!(ui.errors()[0].contains("Unable to connect"));
        assert!(ui.errors()[0].contains("refused"));
    }

    #[test]
    fn malformed_port_is_an_ordinary_connect_failure() {
        let mut config = config();
        config.port = "not-a-port".into();
        let connector = MockConnector::new();
        let mut d = CommandDispatcher::new(config, Box::new(connector.clone()));
        let mut ui = MockUI::new();

        assert!(!d.run("connect", &mut ui).succeeded());
        assert!(ui.has_error("Unable to connect to server sip.example.org port not-a-port"));
        assert_eq!(connector.log().connect, 0);
    }

    #[test]
    fn failed_connect_discards_a_previously_live_session() {
        let good = MockConnector::new();
        let mut d = dispatcher(good);
        let mut ui = MockUI::new();
        d.run("connect", &mut ui);
        assert!(d.is_connected());

        // Breaking the port makes the next attempt fail before the connector.
        d.config.port = "bad".into();
        d.run("connect", &mut ui);
        assert!(!d.is_connected());
    }

    #[test]
    fn login_without_connect_is_a_precondition_failure() {
        let connector = MockConnector::new();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        assert!(!d.run("login", &mut ui).succeeded());
        assert!(ui.has_error("Not connected"));
        assert_eq!(connector.log().login, 0);
    }

    #[test]
    fn login_after_failed_connect_is_a_precondition_failure() {
        let connector = MockConnector::new().refusing_connect();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        assert!(!d.run("login", &mut ui).succeeded());
        assert!(ui.has_error("Not connected"));
        assert_eq!(connector.log().login, 0);
    }

    #[test]
    fn login_sends_configured_credentials() {
        let connector = MockConnector::new();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        assert!(d.run("login", &mut ui).succeeded());
        assert!(ui.has_success("Login OK"));
        assert_eq!(
            connector.log().logins,
            vec![("scuser".into(), "scpass".into(), "desk".into())]
        );
    }

    #[test]
    fn rejected_login_reports_failure() {
        let connector = MockConnector::new().with_login_ok(false);
        let mut d = dispatcher(connector);
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        assert!(!d.run("login", &mut ui).succeeded());
        assert!(ui.has_error("Login Failed"));
    }

    #[test]
    fn status_online_succeeds() {
        let mut d = dispatcher(MockConnector::new());
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        let outcome = d.run("status", &mut ui);
        assert!(outcome.succeeded());
        assert!(ui.has_success("Server is online"));
    }

    #[test]
    fn status_offline_prints_the_raw_response() {
        let mut d = dispatcher(MockConnector::new().with_online(false));
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        let outcome = d.run("status", &mut ui);
        assert!(!outcome.succeeded());
        assert!(ui.has_error("Server is NOT online"));
        // Full raw response follows the negative message.
        assert!(ui.has_message("online_status: N"));

        let RunOutcome::Completed(completed) = outcome else {
            panic!("expected a completed outcome");
        };
        assert!(completed.detail.unwrap().contains("online_status: N"));
    }

    #[test]
    fn status_without_connect_is_a_precondition_failure() {
        let connector = MockConnector::new();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        assert!(!d.run("status", &mut ui).succeeded());
        assert_eq!(connector.log().sc_status, 0);
    }

    #[test]
    fn start_runs_all_three_steps_in_order() {
        let connector = MockConnector::new();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        assert!(d.run("start", &mut ui).succeeded());
        assert_eq!(
            ui.successes(),
            &["Connect OK", "Login OK", "Server is online"]
        );

        let log = connector.log();
        assert_eq!((log.connect, log.login, log.sc_status), (1, 1, 1));
    }

    #[test]
    fn start_short_circuits_on_failed_connect() {
        let connector = MockConnector::new().refusing_connect();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        assert!(!d.run("start", &mut ui).succeeded());

        let log = connector.log();
        assert_eq!(log.connect, 1);
        assert_eq!(log.login, 0);
        assert_eq!(log.sc_status, 0);
    }

    #[test]
    fn start_short_circuits_on_failed_login() {
        let connector = MockConnector::new().with_login_ok(false);
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        assert!(!d.run("start", &mut ui).succeeded());

        let log = connector.log();
        assert_eq!(log.login, 1);
        assert_eq!(log.sc_status, 0);
    }

    #[test]
    fn patron_info_requires_a_barcode() {
        let connector = MockConnector::new();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        assert!(!d.run("patron-info", &mut ui).succeeded());
        assert!(ui.has_error("Patron barcode required"));
        assert_eq!(connector.log().patron_info, 0);
    }

    #[test]
    fn patron_info_without_connect_makes_no_network_call() {
        let connector = MockConnector::new();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        assert!(!d.run("patron-info 123", &mut ui).succeeded());
        assert_eq!(connector.log().patron_info, 0);
    }

    #[test]
    fn patron_info_prints_the_raw_response() {
        let connector = MockConnector::new();
        let mut d = dispatcher(connector.clone());
        let mut ui = MockUI::new();

        d.run("connect", &mut ui);
        let outcome = d.run("patron-info 123456789", &mut ui);
        assert!(outcome.succeeded());
        assert!(ui.has_message("AA: 123456789"));
        assert_eq!(connector.log().barcodes, vec!["123456789".to_string()]);
    }
}
