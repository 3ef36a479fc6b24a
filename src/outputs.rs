//! Output sink descriptions
//!
//! One struct per output kind, the small enums their fields use, and the
//! [`OutputCollection`] that groups parsed outputs and enforces the
//! invariants spanning the whole document.

use std::collections::{BTreeMap, HashSet};

use crate::error::{ParseError, Result};

/// Transport protocol of a send output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendProtocol {
    /// Datagrams, fire-and-forget
    #[default]
    Udp,
    /// Stream connection
    Tcp,
}

/// On-disk compression of a file output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Plain files
    #[default]
    None,
    /// gzip-compressed files
    Gzip,
}

/// Producer partition of a kafka output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KafkaPartition {
    /// Let the broker pick the partition
    #[default]
    Unassigned,
    /// A fixed, non-negative partition number
    Number(i32),
}

/// What the HOSTNAME field of emitted syslog messages carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostnameMode {
    /// Leave the field empty (NILVALUE)
    #[default]
    None,
    /// Use the local machine hostname
    Local,
}

/// Print records to the standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOutput {
    /// Identification of the output
    pub name: String,
}

/// Listen on a port and push records to every connected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOutput {
    /// Identification of the output
    pub name: String,
    /// Listening port
    pub port: u16,
    /// Block the pipeline when a client is slow
    pub blocking: bool,
}

/// Actively send records to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutput {
    /// Identification of the output
    pub name: String,
    /// Destination IPv4/IPv6 literal
    pub address: String,
    /// Destination port
    pub port: u16,
    /// Transport protocol
    pub protocol: SendProtocol,
    /// Block instead of dropping records (TCP only)
    pub blocking: bool,
}

/// Store records into time-windowed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutput {
    /// Identification of the output
    pub name: String,
    /// strftime-style path pattern of the storage directory
    pub path_pattern: String,
    /// File name prefix within each window
    pub prefix: String,
    /// Window length in seconds
    pub window_size: u32,
    /// Align windows to multiples of the window length
    pub window_align: bool,
    /// Compression of closed files
    pub compression: Compression,
}

/// Publish records to a Kafka cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaOutput {
    /// Identification of the output
    pub name: String,
    /// Comma-separated bootstrap broker list
    pub brokers: String,
    /// Destination topic
    pub topic: String,
    /// Producer partition
    pub partition: KafkaPartition,
    /// Protocol fallback for brokers older than 0.10 (validated dotted version)
    pub broker_version: Option<String>,
    /// Block the pipeline when the producer queue is full
    pub blocking: bool,
    /// Apply latency-oriented producer tuning
    pub performance_tuning: bool,
    /// Extra producer properties; first occurrence of a key wins
    pub properties: BTreeMap<String, String>,
}

/// Syslog message priority (facility/severity pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyslogPriority {
    /// RFC 5424 facility, 0..=23
    pub facility: u8,
    /// RFC 5424 severity, 0..=7
    pub severity: u8,
}

impl Default for SyslogPriority {
    fn default() -> Self {
        // local0.info
        Self {
            facility: 16,
            severity: 6,
        }
    }
}

/// TCP syslog socket parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpTransport {
    /// Destination host
    pub hostname: String,
    /// Destination port
    pub port: u16,
    /// Block the pipeline instead of dropping messages
    pub blocking: bool,
}

/// UDP syslog socket parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpTransport {
    /// Destination host
    pub hostname: String,
    /// Destination port
    pub port: u16,
}

/// Exactly one transport must be configured per syslog output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyslogTransport {
    /// Stream socket
    Tcp(TcpTransport),
    /// Datagram socket
    Udp(UdpTransport),
}

/// Emit records as RFC 5424 syslog messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyslogOutput {
    /// Identification of the output
    pub name: String,
    /// HOSTNAME field handling
    pub hostname: HostnameMode,
    /// APP-NAME field, printable ASCII, at most 48 characters
    pub program: String,
    /// Fill the PROCID field with the exporter PID
    pub proc_id: bool,
    /// Message priority
    pub priority: SyslogPriority,
    /// Socket configuration
    pub transport: SyslogTransport,
}

/// All outputs of a parsed configuration, grouped by kind.
///
/// Each group keeps its document order. Invariants checked by
/// [`validate`](Self::validate): at least one output overall, at most one
/// print output, and globally unique names across every kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputCollection {
    /// Print outputs (at most one)
    pub prints: Vec<PrintOutput>,
    /// Server outputs
    pub servers: Vec<ServerOutput>,
    /// Send outputs
    pub sends: Vec<SendOutput>,
    /// File outputs
    pub files: Vec<FileOutput>,
    /// Kafka outputs
    pub kafkas: Vec<KafkaOutput>,
    /// Syslog outputs
    pub syslogs: Vec<SyslogOutput>,
}

impl OutputCollection {
    /// Total number of configured outputs across all kinds.
    pub fn len(&self) -> usize {
        self.prints.len()
            + self.servers.len()
            + self.sends.len()
            + self.files.len()
            + self.kafkas.len()
            + self.syslogs.len()
    }

    /// True when no output is configured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the invariants spanning the whole collection.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ParseError::NoOutputs);
        }

        if self.prints.len() > 1 {
            return Err(ParseError::MultiplePrintOutputs);
        }

        // Names are unique across all kinds, not just within one.
        let mut names = HashSet::new();
        let mut check = |name: &str| -> Result<()> {
            if !names.insert(name.to_string()) {
                return Err(ParseError::DuplicateName(name.to_string()));
            }
            Ok(())
        };

        for print in &self.prints {
            check(&print.name)?;
        }
        for send in &self.sends {
            check(&send.name)?;
        }
        for server in &self.servers {
            check(&server.name)?;
        }
        for file in &self.files {
            check(&file.name)?;
        }
        for kafka in &self.kafkas {
            check(&kafka.name)?;
        }
        for syslog in &self.syslogs {
            check(&syslog.name)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(name: &str) -> PrintOutput {
        PrintOutput {
            name: name.to_string(),
        }
    }

    fn server(name: &str) -> ServerOutput {
        ServerOutput {
            name: name.to_string(),
            port: 4739,
            blocking: false,
        }
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let outputs = OutputCollection::default();
        let err = outputs.validate().unwrap_err();
        assert_eq!(err.to_string(), "at least one output must be defined");
    }

    #[test]
    fn test_single_output_is_enough() {
        let outputs = OutputCollection {
            prints: vec![print("stdout")],
            ..Default::default()
        };
        assert!(outputs.validate().is_ok());
        assert_eq!(outputs.len(), 1);
    }

    #[test]
    fn test_second_print_is_rejected() {
        let outputs = OutputCollection {
            prints: vec![print("a"), print("b")],
            ..Default::default()
        };
        let err = outputs.validate().unwrap_err();
        assert_eq!(err.to_string(), "multiple 'print' outputs are not allowed");
    }

    #[test]
    fn test_duplicate_name_across_kinds() {
        let outputs = OutputCollection {
            prints: vec![print("main")],
            servers: vec![server("main")],
            ..Default::default()
        };
        let err = outputs.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "multiple outputs with the same name 'main'"
        );
    }

    #[test]
    fn test_duplicate_name_within_one_kind() {
        let outputs = OutputCollection {
            servers: vec![server("feed"), server("feed")],
            ..Default::default()
        };
        assert!(outputs.validate().is_err());
    }

    #[test]
    fn test_distinct_names_pass() {
        let outputs = OutputCollection {
            prints: vec![print("stdout")],
            servers: vec![server("feed"), server("feed2")],
            ..Default::default()
        };
        assert!(outputs.validate().is_ok());
        assert_eq!(outputs.len(), 3);
    }
}
