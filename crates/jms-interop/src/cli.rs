//! Command-line front ends for the `jms-sender` and `jms-receiver` binaries.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use jms_interop_codec::{JmsMessageType, Notation, StringPrefixCheck};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::HarnessConfig;
use crate::loopback::run_loopback;
use crate::receiver::ReceiverDriver;
use crate::sender::SenderDriver;
use crate::test_matrix::{TestNumberMap, TestValueMap};
use crate::transport::{FrameReader, FrameWriter};
use crate::HarnessError;

/// Logs go to stderr; stdout carries frames and reports.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jms_interop=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Broker address, e.g. localhost:5672
    pub broker_addr: String,

    /// Queue name
    pub queue: String,

    /// JMS message type, e.g. JMS_MAPMESSAGE_TYPE
    pub jms_message_type: String,

    /// JSON test parameters
    pub json_test_parameters: String,

    /// JSON harness config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Test value notation: hex or literal
    #[arg(long, value_parser = parse_notation)]
    pub notation: Option<Notation>,

    /// Require bytes-message string length prefixes to match their content
    #[arg(long)]
    pub strict_string_prefix: bool,

    /// Carry full 16-bit char code units instead of the low byte
    #[arg(long)]
    pub full_char: bool,

    /// Messages in flight per sendable round
    #[arg(long)]
    pub credit: Option<usize>,
}

impl CommonArgs {
    pub fn address(&self) -> String {
        format!("{}/{}", self.broker_addr, self.queue)
    }

    pub fn message_type(&self) -> Result<JmsMessageType> {
        self.jms_message_type
            .parse()
            .context("Invalid JMS message type argument")
    }

    /// Config file values overridden by command-line flags.
    pub fn harness_config(&self) -> Result<HarnessConfig> {
        let mut config = match &self.config {
            Some(path) => HarnessConfig::load(path).context("Failed to load config file")?,
            None => HarnessConfig::default(),
        };
        if let Some(notation) = self.notation {
            config.codec.notation = notation;
        }
        if self.strict_string_prefix {
            config.codec.string_prefix = StringPrefixCheck::Strict;
        }
        if self.full_char {
            config.codec.char_narrowing = false;
        }
        if let Some(credit) = self.credit {
            config.credit = credit;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_notation(s: &str) -> Result<Notation, String> {
    s.parse().map_err(|err| format!("{err}"))
}

#[derive(Parser, Debug)]
#[command(name = "jms-sender", version, about = "Sends a JMS message test matrix")]
pub struct SenderCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Run against an in-process receiver and print its report
    #[arg(long)]
    pub loopback: bool,
}

#[derive(Parser, Debug)]
#[command(name = "jms-receiver", version, about = "Receives a JMS message test matrix")]
pub struct ReceiverCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Writes one frame per test value to `out`, or the loopback report.
pub fn run_sender(cli: &SenderCli, mut out: impl Write) -> Result<()> {
    let message_type = cli.common.message_type()?;
    let config = cli.common.harness_config()?;
    let values = TestValueMap::from_json(message_type, &cli.common.json_test_parameters)
        .context("Invalid JSON test parameters")?;

    if cli.loopback {
        let receiver = run_loopback(message_type, &values, &config)?;
        writeln!(out, "{}", receiver.report()?)?;
        return Ok(());
    }

    let mut sender = SenderDriver::new(message_type, &values, config.codec);
    let mut transport = FrameWriter::new(cli.common.address(), out);
    sender.on_connection_open(&mut transport)?;
    while !sender.is_finished() {
        // A pipe has no delivery outcome; every written frame counts as accepted.
        let sent = sender.on_sendable(&mut transport, config.credit)?;
        if sent == 0 {
            sender.on_disconnect()?;
            break;
        }
        for _ in 0..sent {
            sender.on_delivery_accept(&mut transport)?;
        }
    }
    sender.on_connection_closed()?;
    info!(sent = sender.msgs_sent(), "sender finished");
    Ok(())
}

/// Reads frames from `input` and writes the receiver report to `out`.
///
/// On failure the values committed so far are written to `diagnostics`
/// before the error is returned.
pub fn run_receiver(
    cli: &ReceiverCli,
    input: impl BufRead,
    mut out: impl Write,
    mut diagnostics: impl Write,
) -> Result<()> {
    let message_type = cli.common.message_type()?;
    let config = cli.common.harness_config()?;
    let numbers = TestNumberMap::from_json(message_type, &cli.common.json_test_parameters)
        .context("Invalid JSON test parameters")?;

    let mut receiver = ReceiverDriver::new(message_type, numbers, config.codec);
    let mut transport = FrameReader::new(cli.common.address(), input);
    if let Err(err) = receive_frames(&mut receiver, &mut transport) {
        writeln!(diagnostics, "{}", receiver.report()?)?;
        return Err(err.into());
    }

    writeln!(out, "{}", receiver.report()?)?;
    Ok(())
}

fn receive_frames<R: BufRead>(
    receiver: &mut ReceiverDriver,
    transport: &mut FrameReader<R>,
) -> Result<(), HarnessError> {
    receiver.on_connection_open(transport)?;
    while let Some(message) = transport.next_message()? {
        receiver.on_message(transport, &message)?;
    }
    if transport.is_closed() {
        receiver.on_connection_closed()
    } else {
        receiver.on_disconnect()
    }
}
