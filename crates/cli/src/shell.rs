//! Interactive shell and command dispatch
//!
//! The shell owns at most one session. Commands that need it fail with
//! [`CliError::NotLoggedIn`] before any call is made; pool fields are parsed
//! before the pool call, so a bad field never reaches the network either.

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::Parser;
use lbctl_core::{LoadBalancerApi, PoolFields, SessionConnector, SessionMaterial};
use lbctl_domain::DeleteOutcome;
use lbctl_infra::config::session_material_from_env;
use tracing::{debug, info};

use crate::cli::{AuthCommand, DcCommand, LbCommand, PoolCommand, ShellCommand, ShellLine};
use crate::error::{failed, CliError};
use crate::output::{ExportedSession, Message, OutputFormat, SessionStatus};

const BANNER: &str = "lbctl interactive shell. Type 'help' for commands, 'exit' to leave.";
const PROMPT: &str = "> ";

type SessionSource = Box<dyn Fn() -> SessionMaterial + Send + Sync>;

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Session state plus command dispatch
pub struct Shell {
    connector: Box<dyn SessionConnector>,
    session: Option<Box<dyn LoadBalancerApi>>,
    session_source: SessionSource,
    format: OutputFormat,
}

impl Shell {
    /// Shell reading `auth env` values from `CLC_API_*` variables
    pub fn new(connector: Box<dyn SessionConnector>, format: OutputFormat) -> Self {
        Self {
            connector,
            session: None,
            session_source: Box::new(session_material_from_env),
            format,
        }
    }

    /// Replace where `auth env` reads session values from
    #[must_use]
    pub fn with_session_source(
        mut self,
        source: impl Fn() -> SessionMaterial + Send + Sync + 'static,
    ) -> Self {
        self.session_source = Box::new(source);
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.has_credentials())
    }

    /// Read commands until end of input, `exit` or `quit`
    ///
    /// Command failures are printed and the loop continues. Only I/O errors
    /// on `input` or `out` end it early.
    pub async fn run_interactive<R, W>(
        &mut self,
        mut input: R,
        out: &mut W,
    ) -> Result<(), CliError>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(out, "{BANNER}")?;
        let mut line = String::new();

        loop {
            write!(out, "\n{PROMPT}")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            match self.execute_line(&line, out).await {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(CliError::Io(err)) => return Err(CliError::Io(err)),
                Err(err) => writeln!(out, "{err}")?,
            }
        }

        self.end_session();
        Ok(())
    }

    /// Run one command given as separate words
    ///
    /// Anything other than an `auth` command first tries to restore a
    /// session from the environment.
    pub async fn run_once<S, W>(&mut self, words: &[S], out: &mut W) -> Result<(), CliError>
    where
        S: AsRef<str>,
        W: Write,
    {
        let is_auth = words.first().is_some_and(|word| word.as_ref() == "auth");
        if !is_auth {
            let material = (self.session_source)();
            match self.connector.restore(&material).await {
                Ok(session) => self.session = Some(session),
                Err(err) => debug!(error = %err, "no session restored from environment"),
            }
        }

        self.execute_words(words, out).await.map(|_| ())
    }

    /// Run one line of shell input. Blank lines do nothing.
    pub async fn execute_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<Flow, CliError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Flow::Continue);
        }
        self.execute_words(&words, out).await
    }

    async fn execute_words<S, W>(&mut self, words: &[S], out: &mut W) -> Result<Flow, CliError>
    where
        S: AsRef<str>,
        W: Write,
    {
        let parsed = ShellLine::try_parse_from(words.iter().map(|word| word.as_ref()));
        match parsed {
            Ok(line) => self.dispatch(line.command, out).await,
            Err(err) if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
            {
                write!(out, "{}", err.render())?;
                Ok(Flow::Continue)
            }
            Err(err) => Err(CliError::Usage(err.render().to_string().trim_end().to_string())),
        }
    }

    async fn dispatch<W: Write>(
        &mut self,
        command: ShellCommand,
        out: &mut W,
    ) -> Result<Flow, CliError> {
        match command {
            ShellCommand::Auth { command } => self.auth(command, out).await?,
            ShellCommand::Dc { command: DcCommand::List } => {
                let datacenters =
                    self.session()?.list_datacenters().await.map_err(failed("DC list"))?;
                self.format.write(out, &datacenters)?;
            }
            ShellCommand::Lb { command } => self.load_balancer(command, out).await?,
            ShellCommand::Pool { command } => self.pool(command, out).await?,
            ShellCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    async fn auth<W: Write>(&mut self, command: AuthCommand, out: &mut W) -> Result<(), CliError> {
        match command {
            AuthCommand::Login { username, password } => {
                self.end_session();
                let session = self
                    .connector
                    .login(&username, &password)
                    .await
                    .map_err(failed("auth login"))?;
                self.session = Some(session);
                self.format.write(out, &self.status())
            }
            AuthCommand::Env => {
                self.end_session();
                let material = (self.session_source)();
                let session =
                    self.connector.restore(&material).await.map_err(failed("auth env"))?;
                self.session = Some(session);
                self.format.write(out, &self.status())
            }
            AuthCommand::Logout => {
                let message = match self.end_session() {
                    Some(user) => format!("user {user} is logged out"),
                    None => "no user was logged in".to_string(),
                };
                self.format.write(out, &Message::new(message))
            }
            AuthCommand::Status => self.format.write(out, &self.status()),
            AuthCommand::Export => {
                let session = self.session()?;
                let export = ExportedSession {
                    username: session.username().to_string(),
                    account_alias: session.account_alias().to_string(),
                    location_alias: session.location_alias().to_string(),
                    bearer_token: session.bearer_token().to_string(),
                };
                self.format.write(out, &export)
            }
        }
    }

    async fn load_balancer<W: Write>(
        &mut self,
        command: LbCommand,
        out: &mut W,
    ) -> Result<(), CliError> {
        match command {
            LbCommand::Create { datacenter, name, description } => {
                let description = description.join(" ");
                let created = self
                    .session()?
                    .create_load_balancer(&datacenter, &name, &description)
                    .await
                    .map_err(failed("LB create"))?;
                self.format.write(out, &created)
            }
            LbCommand::Delete { datacenter, lb_id } => {
                let outcome = self
                    .session()?
                    .delete_load_balancer(&datacenter, &lb_id)
                    .await
                    .map_err(failed("LB delete"))?;
                let message = match outcome {
                    DeleteOutcome::Deleted => "load balancer deleted",
                    DeleteOutcome::AlreadyAbsent => "load balancer not found, nothing to delete",
                };
                self.format.write(out, &Message::new(message))
            }
            LbCommand::Details { datacenter, lb_id } => {
                let lb = self
                    .session()?
                    .inspect_load_balancer(&datacenter, &lb_id)
                    .await
                    .map_err(failed("LB details"))?;
                self.format.write(out, &lb)
            }
            LbCommand::List => {
                let lbs =
                    self.session()?.list_load_balancers().await.map_err(failed("LB list"))?;
                self.format.write(out, &lbs)
            }
        }
    }

    async fn pool<W: Write>(&mut self, command: PoolCommand, out: &mut W) -> Result<(), CliError> {
        match command {
            PoolCommand::Create { datacenter, lb_id, fields } => {
                let session = self.session()?;
                let draft =
                    PoolFields::parse(&fields).map_err(CliError::InvalidPool)?.into_draft(&lb_id);
                let pool = session
                    .create_pool(&datacenter, &lb_id, &draft)
                    .await
                    .map_err(failed("pool create"))?;
                self.format.write(out, &pool)
            }
            PoolCommand::Update { datacenter, lb_id, pool_id, fields } => {
                let session = self.session()?;
                let update = PoolFields::parse(&fields)
                    .map_err(CliError::InvalidPool)?
                    .into_update(&lb_id, &pool_id);
                let pool = session
                    .update_pool(&datacenter, &lb_id, &update)
                    .await
                    .map_err(failed("pool update"))?;
                self.format.write(out, &pool)
            }
            PoolCommand::Delete { datacenter, lb_id, pool_id } => {
                self.session()?
                    .delete_pool(&datacenter, &lb_id, &pool_id)
                    .await
                    .map_err(failed("pool delete"))?;
                self.format.write(out, &Message::new("pool deleted"))
            }
        }
    }

    fn session(&mut self) -> Result<&mut Box<dyn LoadBalancerApi>, CliError> {
        self.session
            .as_mut()
            .filter(|session| session.has_credentials())
            .ok_or(CliError::NotLoggedIn)
    }

    fn status(&self) -> SessionStatus {
        match self.session.as_ref().filter(|session| session.has_credentials()) {
            Some(session) => SessionStatus {
                logged_in: true,
                username: session.username().to_string(),
                account_alias: session.account_alias().to_string(),
                location_alias: session.location_alias().to_string(),
            },
            None => SessionStatus {
                logged_in: false,
                username: String::new(),
                account_alias: String::new(),
                location_alias: String::new(),
            },
        }
    }

    /// Log out and drop the session, returning the user it belonged to
    fn end_session(&mut self) -> Option<String> {
        let mut session = self.session.take()?;
        if !session.has_credentials() {
            return None;
        }

        let user = session.username().to_string();
        session.logout();
        info!(%user, "session ended");
        Some(user)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use lbctl_domain::{
        Datacenter, LbError, LoadBalancer, LoadBalancerCreationInfo, LoadBalancerSummary, Pool,
        PoolNode, Result,
    };

    use super::*;
    use crate::cli::Format;

    #[derive(Default)]
    struct Recorder {
        api_calls: AtomicUsize,
        logins: AtomicUsize,
        restores: AtomicUsize,
        logouts: AtomicUsize,
        last_pool: Mutex<Option<Pool>>,
    }

    impl Recorder {
        fn api_calls(&self) -> usize {
            self.api_calls.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.api_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct MockApi {
        recorder: Arc<Recorder>,
        username: String,
        token: String,
    }

    #[async_trait]
    impl LoadBalancerApi for MockApi {
        fn username(&self) -> &str {
            &self.username
        }

        fn account_alias(&self) -> &str {
            "ACCT"
        }

        fn location_alias(&self) -> &str {
            "VA1"
        }

        fn has_credentials(&self) -> bool {
            !self.token.is_empty()
        }

        fn bearer_token(&self) -> &str {
            &self.token
        }

        fn logout(&mut self) {
            self.recorder.logouts.fetch_add(1, Ordering::SeqCst);
            self.username.clear();
            self.token.clear();
        }

        async fn list_datacenters(&mut self) -> Result<Vec<Datacenter>> {
            self.recorder.hit();
            Ok(vec![Datacenter { id: "VA1".into(), name: "US East".into() }])
        }

        async fn create_load_balancer(
            &mut self,
            _datacenter: &str,
            _name: &str,
            _description: &str,
        ) -> Result<LoadBalancerCreationInfo> {
            self.recorder.hit();
            Ok(LoadBalancerCreationInfo { id: "lb-9".into(), request_time: 0 })
        }

        async fn inspect_load_balancer(
            &mut self,
            datacenter: &str,
            lb_id: &str,
        ) -> Result<LoadBalancer> {
            self.recorder.hit();
            Ok(LoadBalancer {
                id: lb_id.into(),
                name: "web".into(),
                description: String::new(),
                public_ip: "203.0.113.9".into(),
                status: "ACTIVE".into(),
                datacenter: datacenter.into(),
                pools: Vec::new(),
            })
        }

        async fn delete_load_balancer(
            &mut self,
            _datacenter: &str,
            lb_id: &str,
        ) -> Result<DeleteOutcome> {
            self.recorder.hit();
            Ok(if lb_id == "gone" { DeleteOutcome::AlreadyAbsent } else { DeleteOutcome::Deleted })
        }

        async fn list_load_balancers(&mut self) -> Result<Vec<LoadBalancerSummary>> {
            self.recorder.hit();
            Err(LbError::remote(500, "internal error"))
        }

        async fn create_pool(&mut self, _dc: &str, _lb_id: &str, draft: &Pool) -> Result<Pool> {
            self.recorder.hit();
            *self.recorder.last_pool.lock().unwrap() = Some(draft.clone());
            Ok(Pool { id: "pool-1".into(), ..draft.clone() })
        }

        async fn update_pool(&mut self, _dc: &str, _lb_id: &str, pool: &Pool) -> Result<Pool> {
            self.recorder.hit();
            *self.recorder.last_pool.lock().unwrap() = Some(pool.clone());
            Ok(pool.clone())
        }

        async fn delete_pool(&mut self, _dc: &str, _lb_id: &str, _pool_id: &str) -> Result<()> {
            self.recorder.hit();
            Ok(())
        }

        async fn inspect_pool(&mut self, _dc: &str, lb_id: &str, pool_id: &str) -> Result<Pool> {
            self.recorder.hit();
            Err(LbError::PoolNotFound { lb_id: lb_id.into(), pool_id: pool_id.into() })
        }
    }

    struct MockConnector {
        recorder: Arc<Recorder>,
    }

    impl MockConnector {
        fn session(&self, username: &str, token: &str) -> Box<dyn LoadBalancerApi> {
            Box::new(MockApi {
                recorder: Arc::clone(&self.recorder),
                username: username.into(),
                token: token.into(),
            })
        }
    }

    #[async_trait]
    impl SessionConnector for MockConnector {
        async fn login(&self, username: &str, password: &str) -> Result<Box<dyn LoadBalancerApi>> {
            self.recorder.logins.fetch_add(1, Ordering::SeqCst);
            if password == "secret" {
                Ok(self.session(username, "token"))
            } else {
                Err(LbError::remote(400, "bad credentials"))
            }
        }

        async fn restore(&self, material: &SessionMaterial) -> Result<Box<dyn LoadBalancerApi>> {
            self.recorder.restores.fetch_add(1, Ordering::SeqCst);
            match material.token_parts() {
                Some((user, _, _, token)) => Ok(self.session(user, token)),
                None => Err(LbError::MissingCredentials("nothing in environment".into())),
            }
        }
    }

    fn shell(format: Format) -> (Shell, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let connector = MockConnector { recorder: Arc::clone(&recorder) };
        let shell = Shell::new(Box::new(connector), OutputFormat::new(format))
            .with_session_source(SessionMaterial::default);
        (shell, recorder)
    }

    fn env_material() -> SessionMaterial {
        SessionMaterial {
            username: Some("envuser".into()),
            account_alias: Some("ACCT".into()),
            location_alias: Some("VA1".into()),
            bearer_token: Some("env-token".into()),
            password: None,
        }
    }

    async fn run(shell: &mut Shell, line: &str) -> (std::result::Result<Flow, CliError>, String) {
        let mut out = Vec::new();
        let result = shell.execute_line(line, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    async fn logged_in() -> (Shell, Arc<Recorder>) {
        let (mut shell, recorder) = shell(Format::Table);
        let (result, _) = run(&mut shell, "auth login jdoe secret").await;
        assert_eq!(result.unwrap(), Flow::Continue);
        (shell, recorder)
    }

    #[tokio::test]
    async fn commands_without_session_make_no_calls() {
        let (mut shell, recorder) = shell(Format::Table);

        for line in [
            "DC list",
            "LB list",
            "LB details VA1 lb-1",
            "LB delete VA1 lb-1",
            "pool create VA1 lb-1 port=80",
            "pool delete VA1 lb-1 pool-1",
            "auth export",
        ] {
            let (result, _) = run(&mut shell, line).await;
            let err = result.unwrap_err();
            assert!(matches!(err, CliError::NotLoggedIn), "{line}: {err}");
            assert_eq!(err.to_string(), "no user is logged in");
        }
        assert_eq!(recorder.api_calls(), 0);
    }

    #[tokio::test]
    async fn login_reports_session() {
        let (mut shell, _) = shell(Format::Table);

        let (result, out) = run(&mut shell, "auth login jdoe secret").await;
        assert_eq!(result.unwrap(), Flow::Continue);
        assert_eq!(out, "logged in: user=jdoe, accountAlias=ACCT, location=VA1\n");
        assert!(shell.is_logged_in());
    }

    #[tokio::test]
    async fn failed_login_names_the_operation() {
        let (mut shell, _) = shell(Format::Table);

        let (result, _) = run(&mut shell, "auth login jdoe wrong").await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "auth login failed: Remote error 400: bad credentials");
        assert!(!shell.is_logged_in());
    }

    #[tokio::test]
    async fn login_replaces_existing_session() {
        let (mut shell, recorder) = logged_in().await;

        let (result, _) = run(&mut shell, "auth login other secret").await;
        result.unwrap();
        assert_eq!(recorder.logouts.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.logins.load(Ordering::SeqCst), 2);

        let (_, out) = run(&mut shell, "auth status").await;
        assert!(out.contains("user=other"));
    }

    #[tokio::test]
    async fn logout_then_status() {
        let (mut shell, _) = logged_in().await;

        let (_, out) = run(&mut shell, "auth logout").await;
        assert_eq!(out, "user jdoe is logged out\n");
        let (_, out) = run(&mut shell, "auth logout").await;
        assert_eq!(out, "no user was logged in\n");
        let (_, out) = run(&mut shell, "auth status").await;
        assert_eq!(out, "no user is logged in\n");
    }

    #[tokio::test]
    async fn auth_env_restores_from_session_source() {
        let (shell, recorder) = shell(Format::Table);
        let mut shell = shell.with_session_source(env_material);

        let (result, out) = run(&mut shell, "auth env").await;
        result.unwrap();
        assert!(out.contains("user=envuser"));
        assert_eq!(recorder.restores.load(Ordering::SeqCst), 1);

        let (_, out) = run(&mut shell, "auth export").await;
        assert!(out.contains("export CLC_API_TOKEN=env-token\n"));
    }

    #[tokio::test]
    async fn bad_pool_fields_make_no_calls() {
        let (mut shell, recorder) = logged_in().await;

        for line in [
            "pool create VA1 lb-1 port=abc",
            "pool create VA1 lb-1 colour=blue",
            "pool update VA1 lb-1 pool-1 health=1:2",
            "pool create VA1 lb-1 justaword",
        ] {
            let (result, _) = run(&mut shell, line).await;
            assert!(matches!(result, Err(CliError::InvalidPool(_))), "{line}");
        }
        assert_eq!(recorder.api_calls(), 0);
    }

    #[tokio::test]
    async fn pool_create_sends_parsed_draft() {
        let (mut shell, recorder) = logged_in().await;

        let (result, out) =
            run(&mut shell, "pool create VA1 lb-1 target=80 port=9090 nodes=10.0.0.1,10.0.0.2")
                .await;
        result.unwrap();
        assert!(out.contains("pool: lbid=lb-1, id=pool-1"));

        let draft = recorder.last_pool.lock().unwrap().clone().unwrap();
        assert!(draft.is_draft());
        assert_eq!(draft.incoming_port, 9090);
        assert_eq!(
            draft.nodes,
            vec![PoolNode::new("10.0.0.1", 80), PoolNode::new("10.0.0.2", 80)]
        );
    }

    #[tokio::test]
    async fn pool_update_carries_pool_id() {
        let (mut shell, recorder) = logged_in().await;

        let (result, _) = run(&mut shell, "pool update VA1 lb-1 pool-7 method=leastconn").await;
        result.unwrap();

        let pool = recorder.last_pool.lock().unwrap().clone().unwrap();
        assert_eq!(pool.id, "pool-7");
        assert_eq!(pool.method, "leastconn");
    }

    #[tokio::test]
    async fn remote_failures_are_reported_with_operation() {
        let (mut shell, _) = logged_in().await;

        let (result, _) = run(&mut shell, "LB list").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "LB list failed: Remote error 500: internal error"
        );
    }

    #[tokio::test]
    async fn delete_reports_already_absent() {
        let (mut shell, _) = logged_in().await;

        let (_, out) = run(&mut shell, "LB delete VA1 lb-1").await;
        assert_eq!(out, "load balancer deleted\n");
        let (_, out) = run(&mut shell, "LB delete VA1 gone").await;
        assert_eq!(out, "load balancer not found, nothing to delete\n");
    }

    #[tokio::test]
    async fn details_and_datacenters_render() {
        let (mut shell, _) = logged_in().await;

        let (_, out) = run(&mut shell, "LB details VA1 lb-1").await;
        assert!(out.contains("(no pools defined)"));
        let (_, out) = run(&mut shell, "dc list").await;
        assert_eq!(out, "DC: id=VA1, name=\"US East\"\n");
    }

    #[tokio::test]
    async fn json_output_is_parseable() {
        let (mut shell, _) = shell(Format::Json);
        run(&mut shell, "auth login jdoe secret").await.0.unwrap();

        let (_, out) = run(&mut shell, "LB create VA1 web front end").await;
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], "lb-9");
    }

    #[tokio::test]
    async fn help_and_usage_errors() {
        let (mut shell, _) = shell(Format::Table);

        let (result, out) = run(&mut shell, "help").await;
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(out.contains("auth"));
        assert!(out.contains("pool"));

        let (result, _) = run(&mut shell, "LB frobnicate").await;
        assert!(matches!(result, Err(CliError::Usage(_))));

        let (result, out) = run(&mut shell, "   ").await;
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn interactive_loop_stops_at_quit() {
        let (mut shell, recorder) = shell(Format::Table);
        let input = Cursor::new("\nauth login jdoe secret\nbogus\nquit\nDC list\n");
        let mut out = Vec::new();

        shell.run_interactive(input, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(BANNER));
        assert!(text.contains("logged in: user=jdoe"));
        assert!(text.contains("unrecognized subcommand"));
        assert_eq!(recorder.api_calls(), 0);
        assert!(!shell.is_logged_in());
    }

    #[tokio::test]
    async fn interactive_loop_ends_at_eof() {
        let (mut shell, _) = shell(Format::Table);
        let mut out = Vec::new();

        shell.run_interactive(Cursor::new("auth status\n"), &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("no user is logged in"));
    }

    #[tokio::test]
    async fn one_shot_restores_session_from_environment() {
        let (shell, recorder) = shell(Format::Table);
        let mut shell = shell.with_session_source(env_material);
        let mut out = Vec::new();

        shell.run_once(&["DC", "list"], &mut out).await.unwrap();
        assert_eq!(recorder.restores.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.api_calls(), 1);
    }

    #[tokio::test]
    async fn one_shot_auth_commands_skip_environment() {
        let (shell, recorder) = shell(Format::Table);
        let mut shell = shell.with_session_source(env_material);
        let mut out = Vec::new();

        shell.run_once(&["auth", "status"], &mut out).await.unwrap();
        assert_eq!(recorder.restores.load(Ordering::SeqCst), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "no user is logged in\n");
    }

    #[tokio::test]
    async fn one_shot_without_session_fails() {
        let (mut shell, _) = shell(Format::Table);
        let mut out = Vec::new();

        let err = shell.run_once(&["LB", "list"], &mut out).await.unwrap_err();
        assert!(matches!(err, CliError::NotLoggedIn));
        assert_eq!(err.exit_code(), 3);
    }
}
