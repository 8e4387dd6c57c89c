//! Interactive Solr shell.
//!
//! Each line is a query (plain text or a JSON query spec) or a `:command`
//! that changes the client for the following queries.
//!
//! ```text
//! solr> title:dogs
//! solr> {"q": {"title": "dogs", "": "cats"}, "fq": ["year:2020"]}
//! solr> :core films
//! solr> :set rows 5
//! solr> :verbose on
//! ```

// Example-specific lint allowances
#![allow(clippy::print_stdout)]

use serde_json::Value;
use solrq::{ParamValue, Query, SolrClient};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
<query>               run a query and print the documents
:body <query>         run a query and print the whole response body
:url <query>          print the select URL without sending it
:host|:port|:core <v> change the target server
:set <name> <value>   set a default parameter (JSON arrays repeat the parameter)
:unset <name>         remove a default parameter
:defaults             show the default parameters
:verbose on|off       log every URL at info level
:help                 show this help
:quit                 leave";

// ============================================================================
// Commands
// ============================================================================

/// One line of input.
#[derive(Debug, PartialEq)]
enum Command {
    Docs(Query),
    Body(Query),
    Url(Query),
    Host(String),
    Port(String),
    Core(String),
    Set(String, ParamValue),
    Unset(String),
    Defaults,
    Verbose(bool),
    Help,
    Quit,
    Nothing,
}

impl Command {
    fn parse(line: &str) -> solrq::Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Nothing);
        }

        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Docs(line.parse()?));
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, rest)| (name, rest.trim()));

        match (name, rest) {
            ("body", query) => Ok(Self::Body(query.parse()?)),
            ("url", query) => Ok(Self::Url(query.parse()?)),
            ("host", host) if !host.is_empty() => Ok(Self::Host(host.to_string())),
            ("port", port) if !port.is_empty() => Ok(Self::Port(port.to_string())),
            ("core", core) if !core.is_empty() => Ok(Self::Core(core.to_string())),
            ("set", rest) => {
                let (param, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| solrq::Error::invalid_request(":set needs a name and a value"))?;
                Ok(Self::Set(param.to_string(), parse_value(value.trim())))
            }
            ("unset", param) if !param.is_empty() => Ok(Self::Unset(param.to_string())),
            ("defaults", "") => Ok(Self::Defaults),
            ("verbose", "on") => Ok(Self::Verbose(true)),
            ("verbose", "off") => Ok(Self::Verbose(false)),
            ("help", "") => Ok(Self::Help),
            ("quit" | "q" | "exit", "") => Ok(Self::Quit),
            _ => Err(solrq::Error::invalid_request(format!(
                "unknown command ':{command}', try :help"
            ))),
        }
    }
}

/// A JSON array of scalars repeats the parameter; anything else is taken verbatim.
fn parse_value(raw: &str) -> ParamValue {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
        let scalars: Option<Vec<String>> = items
            .iter()
            .map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect();
        if let Some(values) = scalars {
            return ParamValue::Multi(values);
        }
    }
    ParamValue::Single(raw.to_string())
}

fn show_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Single(value) => value.clone(),
        ParamValue::Multi(values) => format!("{values:?}"),
        ParamValue::Fields(terms) => terms
            .iter()
            .map(|(field, term)| format!("{field:?}: {term}"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

// ============================================================================
// Shell
// ============================================================================

/// Run one command. Returns `false` when the shell should stop.
async fn run(solr: &mut SolrClient, command: Command) -> solrq::Result<bool> {
    match command {
        Command::Docs(query) => {
            solr.for_each_doc(query, |doc| println!("{doc}")).await?;
        }
        Command::Body(query) => {
            let body = solr.fetch_body(query).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Url(query) => println!("{}", solr.build_url(query)?),
        Command::Host(host) => solr.server_mut().host = host,
        Command::Port(port) => solr.server_mut().port = port,
        Command::Core(core) => solr.server_mut().core = core,
        Command::Set(name, value) => solr.defaults_mut().set(name, value),
        Command::Unset(name) => {
            solr.defaults_mut().remove(&name);
        }
        Command::Defaults => {
            for (name, value) in solr.defaults().iter() {
                println!("{name} = {}", show_value(value));
            }
        }
        Command::Verbose(verbose) => solr.set_verbose(verbose),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
        Command::Nothing => {}
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut solr = SolrClient::new();
    println!("Connected to {} (:help for commands)", solr.server());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"solr> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = match Command::parse(&line) {
            Ok(command) => run(&mut solr, command).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => warn!(error = %err, "command failed"),
        }
    }

    Ok(())
}
