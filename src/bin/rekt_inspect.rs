//! Rekt Inspect - capture file inspector
//!
//! Decode file capture (datagram RektProtocol yang di-concat) dan laporkan
//! isi per datagram, jumlah per tipe, serta gap sequence per topic.
//!
//! Usage:
//!   cargo run --release --bin rekt_inspect -- dump capture.bin
//!   cargo run --release --bin rekt_inspect -- dump --hex capture.hex
//!   cargo run --release --bin rekt_inspect -- sample capture.bin

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rekt_protocol::core::{write_capture, CaptureFile};
use rekt_protocol::protocol::datagram::*;
use rekt_protocol::protocol::{
    classify_sequence, EndConnectionReason, ObjectRequestAction, SequenceOrder, TopicAction,
    TopicId, TopicResponse,
};
use rekt_protocol::{DatagramBuffer, DatagramReader, DatagramType, ProtocolError};

/// Rekt Inspect - RektProtocol capture inspector
#[derive(Parser, Debug)]
#[command(name = "rekt_inspect")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a capture file and print every datagram
    Dump(DumpArgs),

    /// Write one datagram of every kind to a capture file
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Capture file
    file: PathBuf,

    /// File contains hex text instead of raw bytes
    #[arg(long)]
    hex: bool,

    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Output file
    file: PathBuf,

    /// Write hex text instead of raw bytes
    #[arg(long)]
    hex: bool,
}

/// Inspector configuration
#[derive(Debug)]
struct InspectConfig {
    path: PathBuf,
    hex: bool,
    quiet: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("capture.bin"),
            hex: false,
            quiet: false,
        }
    }
}

impl From<DumpArgs> for InspectConfig {
    fn from(args: DumpArgs) -> Self {
        Self {
            path: args.file,
            hex: args.hex,
            quiet: args.quiet,
        }
    }
}

/// Sequence tracking per topic
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct TopicTrack {
    last_seen: Option<u32>,
    received: u64,
    gaps: u64,
    missing: u64,
    duplicates: u64,
    reordered: u64,
}

impl TopicTrack {
    fn observe(&mut self, sequence: u32) -> Option<SequenceOrder> {
        self.received += 1;

        let Some(last) = self.last_seen else {
            self.last_seen = Some(sequence);
            return None;
        };

        let order = classify_sequence(last, sequence);
        match order {
            SequenceOrder::InOrder => self.last_seen = Some(sequence),
            SequenceOrder::Gap { missing } => {
                self.gaps += 1;
                self.missing += missing as u64;
                self.last_seen = Some(sequence);
            }
            SequenceOrder::Duplicate => self.duplicates += 1,
            SequenceOrder::Reordered => self.reordered += 1,
        }
        Some(order)
    }
}

/// Dump statistics
#[derive(Debug, Default)]
struct DumpStats {
    datagrams: u64,
    bytes_decoded: usize,
    per_kind: HashMap<DatagramType, u64>,
    topics: BTreeMap<TopicId, TopicTrack>,
    error: Option<(usize, ProtocolError)>,
}

impl DumpStats {
    fn record(&mut self, datagram: &Datagram) -> Option<SequenceOrder> {
        self.datagrams += 1;
        self.bytes_decoded += datagram.encoded_len();
        *self.per_kind.entry(datagram.datagram_type()).or_insert(0) += 1;

        match datagram {
            Datagram::Data(data) => self
                .topics
                .entry(data.topic_id())
                .or_default()
                .observe(data.sequence()),
            _ => None,
        }
    }

    fn print_summary(&self, total_bytes: usize) {
        println!("\n📊 Capture Summary");
        println!("   Datagrams:     {}", self.datagrams);
        println!("   Bytes decoded: {} / {}", self.bytes_decoded, total_bytes);

        let mut kinds: Vec<_> = self.per_kind.iter().collect();
        kinds.sort_by_key(|(kind, _)| kind.to_code());
        for (kind, count) in kinds {
            println!("   {:<20} {}", kind.display_name(), count);
        }

        if !self.topics.is_empty() {
            println!("\n📡 Topics");
            for (topic_id, track) in &self.topics {
                println!(
                    "   topic {:<10} recv={} gaps={} missing={} dup={} reordered={}",
                    topic_id,
                    track.received,
                    track.gaps,
                    track.missing,
                    track.duplicates,
                    track.reordered
                );
            }
        }

        if let Some((offset, err)) = &self.error {
            println!("\n⚠️  Stopped at offset {}: {}", offset, err);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Dump(args) => run_dump(&InspectConfig::from(args)),
        Command::Sample(args) => run_sample(args),
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}

fn run_dump(config: &InspectConfig) -> Result<()> {
    info!(path = %config.path.display(), hex = config.hex, "opening capture");

    let capture = CaptureFile::open(&config.path)
        .with_context(|| format!("failed to open capture {}", config.path.display()))?;

    let decoded_hex;
    let bytes: &[u8] = if config.hex {
        decoded_hex = decode_hex(capture.as_bytes())?;
        &decoded_hex
    } else {
        capture.as_bytes()
    };

    let stats = inspect(bytes, config.quiet);
    stats.print_summary(bytes.len());

    if let Some((offset, err)) = &stats.error {
        warn!(offset, error = %err, "capture not fully decoded");
    }
    Ok(())
}

/// Decode every datagram in `bytes`, printing one line each unless `quiet`
fn inspect(bytes: &[u8], quiet: bool) -> DumpStats {
    let mut stats = DumpStats::default();
    let mut reader = DatagramReader::new(bytes);

    loop {
        let offset = reader.position();
        let Some(result) = reader.next() else {
            break;
        };

        match result {
            Ok(datagram) => {
                let order = stats.record(&datagram);
                if !quiet {
                    println!(
                        "{:>8}  {:<20} {}",
                        offset,
                        datagram.datagram_type().display_name(),
                        describe(&datagram)
                    );
                }
                if let Some(order @ (SequenceOrder::Gap { .. } | SequenceOrder::Reordered)) = order
                {
                    debug!(offset, ?order, "sequence anomaly");
                }
            }
            Err(err) => {
                stats.error = Some((offset, err));
            }
        }
    }

    stats
}

fn describe(datagram: &Datagram) -> String {
    match datagram {
        Datagram::ConnectAck(ack) => format!(
            "client={} heartbeat={}",
            ack.client_id, ack.heartbeat_period
        ),
        Datagram::ConnectNack(nack) => format!("{:?}", nack.message()),
        Datagram::Shutdown(shutdown) => format!("reason={}", shutdown.reason),
        Datagram::ServerStatusAck(ack) => format!("connected={}", ack.connected_clients),
        Datagram::Ping(ping) => format!("id={}", ping.ping_id),
        Datagram::Pong(pong) => format!("id={}", pong.ping_id),
        Datagram::TopicRequest(request) => {
            format!("{} topic={}", request.action, request.topic_id)
        }
        Datagram::TopicRequestAck(ack) => format!("{} topic={}", ack.response, ack.topic_id),
        Datagram::TopicRequestNack(nack) => {
            format!("{} {:?}", nack.response(), nack.message())
        }
        Datagram::ObjectRequest(request) => format!(
            "{} object={} topics={:?}",
            request.action(),
            request.object_id(),
            request.topic_ids()
        ),
        Datagram::ObjectRequestAck(ack) => match ack.final_object_id() {
            Some(final_id) => format!(
                "flag={:#04x} object={} final={}",
                ack.flag(),
                ack.object_id(),
                final_id
            ),
            None => format!("flag={:#04x} object={}", ack.flag(), ack.object_id()),
        },
        Datagram::ObjectRequestNack(nack) => format!(
            "flag={:#04x} object={} {:?}",
            nack.flag(),
            nack.object_id(),
            nack.message()
        ),
        Datagram::Data(data) => format!(
            "topic={} seq={} len={} {}",
            data.topic_id(),
            data.sequence(),
            data.payload().len(),
            hex::encode(&data.payload()[..data.payload().len().min(16)])
        ),
        Datagram::Connect(_)
        | Datagram::ServerStatus(_)
        | Datagram::Heartbeat(_)
        | Datagram::HeartbeatRequest(_) => String::new(),
    }
}

/// Hex text to bytes; whitespace (line breaks, spacing) is ignored
fn decode_hex(text: &[u8]) -> Result<Vec<u8>> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    hex::decode(compact).context("capture is not valid hex")
}

fn run_sample(args: SampleArgs) -> Result<()> {
    let mut buf = DatagramBuffer::new();
    for datagram in sample_datagrams()? {
        datagram.encode_into(&mut buf);
    }

    let written = if args.hex {
        write_capture(&args.file, hex::encode(buf.as_bytes()).as_bytes())
    } else {
        write_capture(&args.file, buf.as_bytes())
    }
    .with_context(|| format!("failed to write {}", args.file.display()))?;

    info!(path = %args.file.display(), bytes = written, "sample capture written");
    Ok(())
}

fn sample_datagrams() -> Result<Vec<Datagram>> {
    Ok(vec![
        Connect::new().into(),
        ConnectAck::new(1, 30).into(),
        ConnectNack::new("server full")?.into(),
        ServerStatus::new().into(),
        ServerStatusAck::new(4).into(),
        HeartbeatRequest::new().into(),
        Heartbeat::new().into(),
        Ping::new(5).into(),
        Pong::new(5).into(),
        TopicRequest::new(TopicAction::Subscribe, 42).into(),
        TopicRequestAck::new(TopicResponse::SubSuccess, 42).into(),
        TopicRequestNack::new(TopicResponse::SubFailure, "unknown topic")?.into(),
        ObjectRequest::new(ObjectRequestAction::Create, 7, [42, 43].into_iter().collect())?
            .into(),
        ObjectRequestAck::new(0x01, 7, Some(1007)).into(),
        ObjectRequestNack::new(0x04, 8, "object locked")?.into(),
        Data::new(1, 42, b"hello".to_vec())?.into(),
        Data::new(2, 42, b"world".to_vec())?.into(),
        Data::new(5, 42, b"late".to_vec())?.into(),
        Shutdown::new(EndConnectionReason::Shutdown).into(),
    ])
}
