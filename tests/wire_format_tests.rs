//! Wire-format conformance tests across all four formatters.

use chrono::{DateTime, Local, TimeZone};
use rstest::rstest;
use wirelog::{
    priority, Cef, Leef, Rfc3164, Rfc3164Config, Rfc3164Options, Rfc5424, Rfc5424Config,
    Rfc5424Options, DEFAULT_FACILITY,
};

fn fixed_local() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 6, 9, 13, 37, 42)
        .single()
        .expect("timestamp is unambiguous")
}

#[rstest]
#[case(0, 184)]
#[case(1, 185)]
#[case(2, 186)]
#[case(3, 187)]
#[case(4, 188)]
#[case(5, 189)]
#[case(6, 190)]
#[case(7, 191)]
fn default_facility_priorities_are_exact(#[case] severity: u8, #[case] pri: u16) {
    assert_eq!(priority(DEFAULT_FACILITY, severity), pri);

    let formatter = Rfc5424::with_config(Rfc5424Config {
        hostname: "host".into(),
        application_name: "app".into(),
        ..Rfc5424Config::default()
    })
    .unwrap();
    let options = Rfc5424Options {
        severity: Some(severity),
        timestamp: Some(fixed_local()),
        ..Rfc5424Options::default()
    };
    let message = formatter.build_message("m", &options).unwrap();
    assert!(message.starts_with(&format!("<{pri}>1 ")));
}

#[test]
fn rfc3164_lines_follow_the_bsd_shape() {
    let formatter = Rfc3164::with_config(Rfc3164Config {
        hostname: "gateway".into(),
        application_name: "router".into(),
        ..Rfc3164Config::default()
    })
    .unwrap();
    let options = Rfc3164Options {
        timestamp: Some(fixed_local()),
        ..Rfc3164Options::default()
    };
    let line = formatter.build_message("interface up", &options).unwrap();
    assert_eq!(line, "<190>Jun  9 13:37:42 gateway router interface up\n");

    let shape = regex::Regex::new(
        r"^<\d{1,3}>[A-Z][a-z]{2} [ 1-3]\d \d{2}:\d{2}:\d{2} \S+ \S+ .*\n$",
    )
    .unwrap();
    assert!(shape.is_match(&line));
}

#[test]
fn rfc5424_lines_follow_the_ietf_shape() {
    let formatter = Rfc5424::with_config(Rfc5424Config {
        hostname: "gateway".into(),
        application_name: "router".into(),
        ..Rfc5424Config::default()
    })
    .unwrap();
    let options = Rfc5424Options {
        structured_data: vec!["[meta seq=\"1\"]".into()],
        timestamp: Some(fixed_local()),
        ..Rfc5424Options::default()
    };
    let line = formatter.build_message("interface up", &options).unwrap();
    let shape = regex::Regex::new(
        r#"^<\d{1,3}>1 \d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}\+00:00 gateway router - - \[meta seq="1"\] BOMinterface up\n$"#,
    )
    .unwrap();
    assert!(shape.is_match(&line), "unexpected line: {line}");
}

#[test]
fn leef_events_join_attributes_with_tabs() {
    let mut event = Leef::new()
        .with_vendor("IBM")
        .with_product("QRadar")
        .with_version("2.0")
        .with_event_id("authFailure");
    event.set_attribute("usrName", "root");
    event.set_attribute("src", "203.0.113.7");
    assert_eq!(
        event.build_message(),
        "LEEF:2.0|IBM|QRadar|2.0|authFailure|src=203.0.113.7\tusrName=root\t"
    );
}

#[test]
fn cef_events_join_extensions_with_spaces() {
    let mut event = Cef::new()
        .with_device_vendor("Acme")
        .with_device_product("Sentinel")
        .with_device_version("3.1")
        .with_device_event_class_id("600")
        .with_name("port scan")
        .with_severity("Low");
    event.set_extension("sourceAddress", "203.0.113.7");
    event.set_extension("destinationPort", 22u16);
    event.validate().expect("event conforms to the dictionary");
    assert_eq!(
        event.build_message(),
        "CEF:0|Acme|Sentinel|3.1|600|port scan|Low|destinationPort=22 sourceAddress=203.0.113.7 "
    );
}

#[test]
fn cef_and_leef_events_carry_no_trailing_newline() {
    assert!(!Leef::new().build_message().ends_with('\n'));
    assert!(!Cef::new().build_message().ends_with('\n'));
}

#[test]
fn syslog_lines_always_carry_one() {
    let rfc3164 = Rfc3164::new();
    let rfc5424 = Rfc5424::new();
    let options = Rfc3164Options::default();
    assert!(rfc3164.build_message("x", &options).unwrap().ends_with('\n'));
    assert!(
        rfc5424
            .build_message("x", &Rfc5424Options::default())
            .unwrap()
            .ends_with('\n')
    );
}
