//! Integration tests for complete configuration documents
//!
//! Each test feeds a whole YAML document through `Config::parse` and checks
//! either the resulting typed configuration or the single wrapped
//! diagnostic:
//! - cross-output invariants (cardinality, print limit, global name
//!   uniqueness)
//! - per-kind defaults and local validation
//! - the syslog oneof and priority rules
//! - kafka property first-write-wins
//! - file loading via `Config::load`

use flowsink_config::{
    Compression, Config, ConfigError, HostnameMode, KafkaPartition, SendProtocol, SyslogTransport,
    TcpFlagsStyle, TimestampStyle,
};

// =============================================================================
// Full Document Tests
// =============================================================================

#[test]
fn test_full_document_all_output_kinds() {
    let config = Config::parse(
        r#"
tcp_flags: raw
timestamp: unix
protocol: formatted
ignore_unknown: false
split_biflow: true
outputs:
  - print:
      name: stdout
  - server:
      name: feed
      port: 8080
      blocking: true
  - send:
      name: exporter
      ip: "10.0.0.1"
      port: 4740
      protocol: tcp
      blocking: true
  - file:
      name: archive
      path: /tmp/%Y/%m/%d/flows
      prefix: json.
      time_window: 600
      time_alignment: false
      compression: gzip
  - kafka:
      name: bus
      brokers: "broker1:9092,broker2:9092"
      topic: flows
      partition: 3
      broker_version: "0.9.0.1"
      blocking: true
      performance_tuning: false
      property:
        - key: compression.codec
          value: lz4
  - syslog:
      name: sys
      hostname: local
      program: flowexport
      proc_id: true
      priority:
        facility: 10
        severity: 5
      transport:
        tcp:
          hostname: logs.internal
          port: 6514
          blocking: true
"#,
    )
    .unwrap();

    assert_eq!(config.format.tcp_flags, TcpFlagsStyle::Raw);
    assert_eq!(config.format.timestamp, TimestampStyle::Unix);
    assert!(!config.format.ignore_unknown);
    assert!(config.format.split_biflow);

    assert_eq!(config.outputs.len(), 6);

    let server = &config.outputs.servers[0];
    assert_eq!((server.port, server.blocking), (8080, true));

    let send = &config.outputs.sends[0];
    assert_eq!(send.address, "10.0.0.1");
    assert_eq!(send.port, 4740);
    assert_eq!(send.protocol, SendProtocol::Tcp);

    let file = &config.outputs.files[0];
    assert_eq!(file.path_pattern, "/tmp/%Y/%m/%d/flows");
    assert_eq!(file.prefix, "json.");
    assert_eq!(file.window_size, 600);
    assert!(!file.window_align);
    assert_eq!(file.compression, Compression::Gzip);

    let kafka = &config.outputs.kafkas[0];
    assert_eq!(kafka.partition, KafkaPartition::Number(3));
    assert_eq!(kafka.broker_version.as_deref(), Some("0.9.0.1"));
    assert!(kafka.blocking);
    assert!(!kafka.performance_tuning);
    assert_eq!(
        kafka.properties.get("compression.codec").map(String::as_str),
        Some("lz4")
    );

    let syslog = &config.outputs.syslogs[0];
    assert_eq!(syslog.hostname, HostnameMode::Local);
    assert_eq!(syslog.program, "flowexport");
    assert!(syslog.proc_id);
    assert_eq!((syslog.priority.facility, syslog.priority.severity), (10, 5));
    match &syslog.transport {
        SyslogTransport::Tcp(tcp) => {
            assert_eq!(tcp.hostname, "logs.internal");
            assert_eq!(tcp.port, 6514);
            assert!(tcp.blocking);
        }
        SyslogTransport::Udp(_) => panic!("expected a tcp transport"),
    }
}

#[test]
fn test_outputs_keep_document_order() {
    let config = Config::parse(
        r#"
outputs:
  - server:
      name: second
      port: 2
  - server:
      name: first
      port: 1
"#,
    )
    .unwrap();

    let names: Vec<&str> = config
        .outputs
        .servers
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["second", "first"]);
}

// =============================================================================
// Cross-Output Invariant Tests
// =============================================================================

#[test]
fn test_empty_outputs_fails() {
    let err = Config::parse("outputs: []\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse the configuration: at least one output must be defined"
    );
}

#[test]
fn test_two_print_outputs_fail_one_succeeds() {
    let two = r#"
outputs:
  - print:
      name: a
  - print:
      name: b
"#;
    let err = Config::parse(two).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse the configuration: multiple 'print' outputs are not allowed"
    );

    let one = "outputs:\n  - print:\n      name: a\n";
    assert!(Config::parse(one).is_ok());
}

#[test]
fn test_name_collision_across_kinds() {
    let err = Config::parse(
        r#"
outputs:
  - print:
      name: main
  - kafka:
      name: main
      brokers: localhost:9092
      topic: flows
"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse the configuration: multiple outputs with the same name 'main'"
    );
}

// =============================================================================
// Atomicity / Error Surface Tests
// =============================================================================

#[test]
fn test_failure_in_last_output_discards_everything() {
    // Five valid outputs followed by one invalid one: the caller sees only
    // the single wrapped error, never a partial collection.
    let err = Config::parse(
        r#"
outputs:
  - print:
      name: stdout
  - server:
      name: feed
      port: 8080
  - send:
      name: exporter
  - file:
      name: archive
      path: /tmp/flows
  - kafka:
      name: bus
      brokers: b
      topic: t
  - syslog:
      name: sys
"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse the configuration: syslog transport type must be defined"
    );
}

#[test]
fn test_every_failure_carries_the_single_prefix() {
    let bad_documents = [
        "outputs:\n  - print:\n      name: a\n      extra: b\n",
        "outputs:\n  - server:\n      name: a\n      port: 65536\n",
        "outputs:\n  - send:\n      name: a\n      ip: not-an-ip\n",
        "outputs:\n  - file:\n      name: a\n",
        "outputs:\n  - kafka:\n      name: a\n      brokers: b\n      topic: t\n      broker_version: \"1\"\n",
    ];
    for doc in bad_documents {
        let err = Config::parse(doc).unwrap_err();
        assert!(
            err.to_string().starts_with("failed to parse the configuration: "),
            "unexpected diagnostic: {err}"
        );
    }
}

// =============================================================================
// Syslog Oneof Tests
// =============================================================================

#[test]
fn test_syslog_without_transport_block() {
    let err = Config::parse(
        r#"
outputs:
  - syslog:
      name: sys
      program: flowexport
"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse the configuration: syslog transport type must be defined"
    );
}

#[test]
fn test_syslog_with_both_transports() {
    let err = Config::parse(
        r#"
outputs:
  - syslog:
      name: sys
      transport:
        tcp:
          hostname: h
          port: 514
          blocking: false
        udp:
          hostname: h
          port: 514
"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse the configuration: multiple syslog transport types are not allowed"
    );
}

#[test]
fn test_syslog_udp_transport_minimal() {
    let config = Config::parse(
        r#"
outputs:
  - syslog:
      name: sys
      transport:
        udp:
          hostname: localhost
          port: 514
"#,
    )
    .unwrap();
    match &config.outputs.syslogs[0].transport {
        SyslogTransport::Udp(udp) => {
            assert_eq!(udp.hostname, "localhost");
            assert_eq!(udp.port, 514);
        }
        SyslogTransport::Tcp(_) => panic!("expected a udp transport"),
    }
}

// =============================================================================
// Kafka Property Tests
// =============================================================================

#[test]
fn test_kafka_duplicate_property_keeps_first_value() {
    let config = Config::parse(
        r#"
outputs:
  - kafka:
      name: bus
      brokers: localhost:9092
      topic: flows
      property:
        - key: queue.buffering.max.ms
          value: "50"
        - key: queue.buffering.max.ms
          value: "5000"
"#,
    )
    .unwrap();
    let props = &config.outputs.kafkas[0].properties;
    assert_eq!(props.len(), 1);
    assert_eq!(
        props.get("queue.buffering.max.ms").map(String::as_str),
        Some("50")
    );
}

// =============================================================================
// File Loading Tests
// =============================================================================

#[test]
fn test_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("flowsink.yaml");
    std::fs::write(
        &path,
        "timestamp: unix\noutputs:\n  - print:\n      name: stdout\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.format.timestamp, TimestampStyle::Unix);
    assert_eq!(config.outputs.prints[0].name, "stdout");
}

#[test]
fn test_load_missing_file_reports_path() {
    let err = Config::load("/nonexistent/flowsink.yaml").unwrap_err();
    match &err {
        ConfigError::Io { path, .. } => assert_eq!(path, "/nonexistent/flowsink.yaml"),
        ConfigError::Parse(_) => panic!("expected an I/O error"),
    }
    assert!(err.to_string().starts_with("failed to read configuration file"));
}
