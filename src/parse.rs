//! Per-output field parsers
//!
//! One parser per output kind plus the nested sub-blocks (kafka properties,
//! syslog priority and transport). Every parser follows the same shape:
//! seed the kind's defaults, walk the labeled children through [`node`],
//! reject unknown tags, then run the kind's local validation and hand back
//! a fully built value. Nothing here mutates shared state; the collection
//! is assembled by [`parse_outputs`] and returned as a whole.

use serde_yaml::Value;

use crate::error::{ParseError, Result};
use crate::node;
use crate::outputs::{
    Compression, FileOutput, HostnameMode, KafkaOutput, KafkaPartition, OutputCollection,
    PrintOutput, SendOutput, SendProtocol, ServerOutput, SyslogOutput, SyslogPriority,
    SyslogTransport, TcpTransport, UdpTransport,
};
use crate::validate;

const SYSLOG_FACILITY_MAX: u64 = 23;
const SYSLOG_SEVERITY_MAX: u64 = 7;
const SYSLOG_PROGRAM_MAX_LEN: usize = 48;

/// Parse the `outputs` sequence into a grouped collection.
///
/// Cross-output invariants are *not* checked here; the orchestrator runs
/// [`OutputCollection::validate`] once the whole document is parsed.
pub(crate) fn parse_outputs(value: &Value) -> Result<OutputCollection> {
    let mut collection = OutputCollection::default();

    for item in node::sequence(value, "outputs")? {
        for (kind, body) in node::children(item, "outputs")? {
            match kind {
                "print" => collection.prints.push(parse_print(body)?),
                "server" => collection.servers.push(parse_server(body)?),
                "send" => collection.sends.push(parse_send(body)?),
                "file" => collection.files.push(parse_file(body)?),
                "kafka" => collection.kafkas.push(parse_kafka(body)?),
                "syslog" => collection.syslogs.push(parse_syslog(body)?),
                other => {
                    return Err(ParseError::UnexpectedElement {
                        element: other.to_string(),
                        context: "outputs",
                    });
                }
            }
        }
    }

    Ok(collection)
}

fn parse_print(value: &Value) -> Result<PrintOutput> {
    let mut name = String::new();

    for (tag, child) in node::children(value, "print")? {
        match tag {
            "name" => name = node::string(child, "name", "print")?.to_string(),
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "print",
                });
            }
        }
    }

    if name.is_empty() {
        return Err(ParseError::MissingName { kind: "print" });
    }

    Ok(PrintOutput { name })
}

fn parse_server(value: &Value) -> Result<ServerOutput> {
    let mut name = String::new();
    let mut port: Option<u16> = None;
    let mut blocking = false;

    for (tag, child) in node::children(value, "server")? {
        match tag {
            "name" => name = node::string(child, "name", "server")?.to_string(),
            "port" => port = Some(node::port(child, "port", "server", "'server' output")?),
            "blocking" => blocking = node::boolean(child, "blocking", "server")?,
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "server",
                });
            }
        }
    }

    if name.is_empty() {
        return Err(ParseError::MissingName { kind: "server" });
    }
    let port = port.ok_or(ParseError::MissingField {
        element: "port",
        context: "'server' output",
    })?;

    Ok(ServerOutput {
        name,
        port,
        blocking,
    })
}

fn parse_send(value: &Value) -> Result<SendOutput> {
    let mut name = String::new();
    let mut address = String::from("127.0.0.1");
    let mut port = 4739u16;
    let mut protocol = SendProtocol::Udp;
    let mut blocking = false;

    for (tag, child) in node::children(value, "send")? {
        match tag {
            "name" => name = node::string(child, "name", "send")?.to_string(),
            "ip" => address = node::string(child, "ip", "send")?.to_string(),
            "port" => port = node::port(child, "port", "send", "'send' output")?,
            "protocol" => {
                let raw = node::string(child, "protocol", "send")?;
                protocol = if validate::choose_two("protocol", raw, "UDP", "TCP")? {
                    SendProtocol::Udp
                } else {
                    SendProtocol::Tcp
                };
            }
            "blocking" => blocking = node::boolean(child, "blocking", "send")?,
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "send",
                });
            }
        }
    }

    if name.is_empty() {
        return Err(ParseError::MissingName { kind: "send" });
    }
    if address.is_empty() || !validate::is_ip_literal(&address) {
        return Err(ParseError::InvalidAddress { output: name });
    }

    Ok(SendOutput {
        name,
        address,
        port,
        protocol,
        blocking,
    })
}

fn parse_file(value: &Value) -> Result<FileOutput> {
    let mut name = String::new();
    let mut path_pattern = String::new();
    let mut prefix = String::new();
    let mut window_size = 300u32;
    let mut window_align = true;
    let mut compression = Compression::None;

    for (tag, child) in node::children(value, "file")? {
        match tag {
            "name" => name = node::string(child, "name", "file")?.to_string(),
            "path" => path_pattern = node::string(child, "path", "file")?.to_string(),
            "prefix" => prefix = node::string(child, "prefix", "file")?.to_string(),
            "time_window" => {
                let raw = node::uint(child, "time_window", "file")?;
                window_size = u32::try_from(raw).map_err(|_| ParseError::InvalidWindowSize(raw))?;
            }
            "time_alignment" => window_align = node::boolean(child, "time_alignment", "file")?,
            "compression" => {
                let raw = node::string(child, "compression", "file")?;
                compression = if raw.eq_ignore_ascii_case("none") {
                    Compression::None
                } else if raw.eq_ignore_ascii_case("gzip") {
                    Compression::Gzip
                } else {
                    return Err(ParseError::UnknownCompression(raw.to_string()));
                };
            }
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "file",
                });
            }
        }
    }

    if name.is_empty() {
        return Err(ParseError::MissingName { kind: "file" });
    }
    if path_pattern.is_empty() {
        return Err(ParseError::MissingPath { output: name });
    }

    Ok(FileOutput {
        name,
        path_pattern,
        prefix,
        window_size,
        window_align,
        compression,
    })
}

fn parse_kafka(value: &Value) -> Result<KafkaOutput> {
    let mut output = KafkaOutput {
        name: String::new(),
        brokers: String::new(),
        topic: String::new(),
        partition: KafkaPartition::Unassigned,
        broker_version: None,
        blocking: false,
        performance_tuning: true,
        properties: Default::default(),
    };

    for (tag, child) in node::children(value, "kafka")? {
        match tag {
            "name" => output.name = node::string(child, "name", "kafka")?.to_string(),
            "brokers" => output.brokers = node::string(child, "brokers", "kafka")?.to_string(),
            "topic" => output.topic = node::string(child, "topic", "kafka")?.to_string(),
            "partition" => output.partition = parse_kafka_partition(child)?,
            "broker_version" => {
                output.broker_version =
                    Some(node::string(child, "broker_version", "kafka")?.to_string());
            }
            "blocking" => output.blocking = node::boolean(child, "blocking", "kafka")?,
            "performance_tuning" => {
                output.performance_tuning = node::boolean(child, "performance_tuning", "kafka")?;
            }
            "property" => {
                for block in node::sequence(child, "property")? {
                    parse_kafka_property(&mut output, block)?;
                }
            }
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "kafka",
                });
            }
        }
    }

    if output.name.is_empty() {
        return Err(ParseError::MissingName { kind: "kafka" });
    }
    if output.brokers.is_empty() {
        return Err(ParseError::MissingBrokers);
    }
    if output.topic.is_empty() {
        return Err(ParseError::MissingTopic);
    }
    if let Some(version) = &output.broker_version {
        // At least major + minor must be present.
        validate::parse_dotted_version(version)?;
    }

    Ok(output)
}

/// The partition is either the word `unassigned` or a non-negative number;
/// the number may arrive as a plain integer scalar or a quoted string.
fn parse_kafka_partition(value: &Value) -> Result<KafkaPartition> {
    let invalid = |raw: &str| ParseError::InvalidPartition(raw.to_string());

    if let Some(raw) = value.as_str() {
        if raw.eq_ignore_ascii_case("unassigned") {
            return Ok(KafkaPartition::Unassigned);
        }
        let number: i32 = raw.parse().map_err(|_| invalid(raw))?;
        if number < 0 {
            return Err(invalid(raw));
        }
        return Ok(KafkaPartition::Number(number));
    }

    if let Some(raw) = value.as_u64() {
        let number = i32::try_from(raw).map_err(|_| invalid(&raw.to_string()))?;
        return Ok(KafkaPartition::Number(number));
    }

    Err(ParseError::WrongType {
        element: "partition",
        context: "kafka",
        expected: "non-negative integer or 'unassigned'",
    })
}

/// Parse one `{key, value}` property block into the properties map.
///
/// Insertion is first-write-wins: when the key already exists from an
/// earlier block, the new value is silently discarded.
fn parse_kafka_property(output: &mut KafkaOutput, value: &Value) -> Result<()> {
    let mut key = String::new();
    let mut prop_value = String::new();

    for (tag, child) in node::children(value, "property")? {
        match tag {
            "key" => key = node::string(child, "key", "property")?.to_string(),
            "value" => prop_value = node::string(child, "value", "property")?.to_string(),
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "property",
                });
            }
        }
    }

    if key.is_empty() {
        return Err(ParseError::EmptyPropertyKey);
    }

    output.properties.entry(key).or_insert(prop_value);
    Ok(())
}

fn parse_syslog(value: &Value) -> Result<SyslogOutput> {
    let mut name = String::new();
    let mut hostname = HostnameMode::None;
    let mut program = String::new();
    let mut proc_id = false;
    let mut priority = SyslogPriority::default();
    let mut transport: Option<SyslogTransport> = None;

    for (tag, child) in node::children(value, "syslog")? {
        match tag {
            "name" => name = node::string(child, "name", "syslog")?.to_string(),
            "hostname" => {
                let raw = node::string(child, "hostname", "syslog")?;
                hostname = if raw.eq_ignore_ascii_case("none") {
                    HostnameMode::None
                } else if raw.eq_ignore_ascii_case("local") {
                    HostnameMode::Local
                } else {
                    return Err(ParseError::UnknownHostnameMode(raw.to_string()));
                };
            }
            "program" => program = node::string(child, "program", "syslog")?.to_string(),
            "proc_id" => proc_id = node::boolean(child, "proc_id", "syslog")?,
            "priority" => priority = parse_syslog_priority(child)?,
            "transport" => transport = Some(parse_syslog_transport(child)?),
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "syslog",
                });
            }
        }
    }

    if name.is_empty() {
        return Err(ParseError::MissingName { kind: "syslog" });
    }
    let transport = transport.ok_or(ParseError::MissingTransport)?;
    if !validate::is_syslog_ascii(&program) {
        return Err(ParseError::InvalidSyslogIdentifier { output: name });
    }
    if program.len() > SYSLOG_PROGRAM_MAX_LEN {
        return Err(ParseError::SyslogIdentifierTooLong { output: name });
    }

    Ok(SyslogOutput {
        name,
        hostname,
        program,
        proc_id,
        priority,
        transport,
    })
}

/// Both fields must be explicitly present; defaults apply only when the
/// whole `priority` block is absent.
fn parse_syslog_priority(value: &Value) -> Result<SyslogPriority> {
    let mut facility: Option<u64> = None;
    let mut severity: Option<u64> = None;

    for (tag, child) in node::children(value, "priority")? {
        match tag {
            "facility" => facility = Some(node::uint(child, "facility", "priority")?),
            "severity" => severity = Some(node::uint(child, "severity", "priority")?),
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "priority",
                });
            }
        }
    }

    let (Some(facility), Some(severity)) = (facility, severity) else {
        return Err(ParseError::IncompletePriority);
    };

    if facility > SYSLOG_FACILITY_MAX {
        return Err(ParseError::FacilityOutOfRange(facility));
    }
    if severity > SYSLOG_SEVERITY_MAX {
        return Err(ParseError::SeverityOutOfRange(severity));
    }

    Ok(SyslogPriority {
        facility: facility as u8,
        severity: severity as u8,
    })
}

fn parse_syslog_transport(value: &Value) -> Result<SyslogTransport> {
    let mut transport: Option<SyslogTransport> = None;

    for (tag, child) in node::children(value, "transport")? {
        if transport.is_some() {
            return Err(ParseError::MultipleTransports);
        }

        match tag {
            "tcp" => transport = Some(SyslogTransport::Tcp(parse_syslog_tcp(child)?)),
            "udp" => transport = Some(SyslogTransport::Udp(parse_syslog_udp(child)?)),
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "transport",
                });
            }
        }
    }

    transport.ok_or(ParseError::MissingTransport)
}

/// Builder for the tcp sub-block. All three fields are mandatory; a missing
/// one is a hard error rather than a zero default, so an unconfigured port
/// can never slip past the range check.
#[derive(Default)]
struct TcpTransportBuilder {
    hostname: Option<String>,
    port: Option<u16>,
    blocking: Option<bool>,
}

impl TcpTransportBuilder {
    fn finish(self) -> Result<TcpTransport> {
        let missing = |element| ParseError::MissingField {
            element,
            context: "'tcp' syslog transport",
        };
        Ok(TcpTransport {
            hostname: self.hostname.ok_or_else(|| missing("hostname"))?,
            port: self.port.ok_or_else(|| missing("port"))?,
            blocking: self.blocking.ok_or_else(|| missing("blocking"))?,
        })
    }
}

fn parse_syslog_tcp(value: &Value) -> Result<TcpTransport> {
    let mut builder = TcpTransportBuilder::default();

    for (tag, child) in node::children(value, "tcp")? {
        match tag {
            "hostname" => {
                builder.hostname = Some(node::string(child, "hostname", "tcp")?.to_string());
            }
            "port" => {
                builder.port = Some(node::port(child, "port", "tcp", "'tcp' syslog transport")?);
            }
            "blocking" => builder.blocking = Some(node::boolean(child, "blocking", "tcp")?),
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "tcp",
                });
            }
        }
    }

    builder.finish()
}

/// Builder for the udp sub-block; UDP has no blocking semantics.
#[derive(Default)]
struct UdpTransportBuilder {
    hostname: Option<String>,
    port: Option<u16>,
}

impl UdpTransportBuilder {
    fn finish(self) -> Result<UdpTransport> {
        let missing = |element| ParseError::MissingField {
            element,
            context: "'udp' syslog transport",
        };
        Ok(UdpTransport {
            hostname: self.hostname.ok_or_else(|| missing("hostname"))?,
            port: self.port.ok_or_else(|| missing("port"))?,
        })
    }
}

fn parse_syslog_udp(value: &Value) -> Result<UdpTransport> {
    let mut builder = UdpTransportBuilder::default();

    for (tag, child) in node::children(value, "udp")? {
        match tag {
            "hostname" => {
                builder.hostname = Some(node::string(child, "hostname", "udp")?.to_string());
            }
            "port" => {
                builder.port = Some(node::port(child, "port", "udp", "'udp' syslog transport")?);
            }
            other => {
                return Err(ParseError::UnexpectedElement {
                    element: other.to_string(),
                    context: "udp",
                });
            }
        }
    }

    builder.finish()
}
