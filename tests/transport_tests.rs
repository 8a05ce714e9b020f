//! Socket-level behaviour of the transport: UDP fire-and-forget, the
//! TCP write/half-close/wait lifecycle, timeout semantics, and the
//! local failures that must precede any network work.

use std::io::Read;
use std::net::{TcpListener, UdpSocket};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use wirelog::{MessageFormat, Protocol, Syslog, SyslogError, Transport, TransportConfig};

fn udp_listener() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind an ephemeral UDP port");
    socket
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("set a read timeout");
    let port = socket.local_addr().expect("local addr").port();
    (socket, port)
}

fn loopback(port: u16) -> TransportConfig {
    TransportConfig::default()
        .with_target("127.0.0.1")
        .with_port(port)
}

#[test]
fn udp_send_resolves_with_the_exact_bytes_sent() {
    let (socket, port) = udp_listener();
    let transport = Transport::new(loopback(port));
    let sent = transport.send("<190>TestMsg\n").expect("udp send");
    assert_eq!(sent, "<190>TestMsg\n");

    let mut buffer = [0u8; 1024];
    let (len, _) = socket.recv_from(&mut buffer).expect("datagram arrives");
    assert_eq!(&buffer[..len], sent.as_bytes());
}

#[test]
fn udp_send_has_no_timeout_to_trip() {
    // Port 9 is the discard port; nothing listens there in this test
    // and nothing needs to. A UDP send completes once the datagram is
    // queued, even with a sub-millisecond TCP deadline configured.
    let transport = Transport::new(
        loopback(9).with_tcp_timeout(Duration::from_millis(1)),
    );
    assert!(transport.send("<190>droppable\n").is_ok());
}

#[test]
fn tcp_send_completes_when_the_collector_closes() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let (tx, rx) = mpsc::channel();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut received = Vec::new();
        stream.read_to_end(&mut received).expect("read to EOF");
        tx.send(received).expect("hand bytes to the test");
        // Dropping the stream closes the connection, which is what the
        // transport waits for.
    });

    let transport = Transport::new(
        loopback(port)
            .with_protocol("tcp")
            .with_tcp_timeout(Duration::from_secs(5)),
    );
    let sent = transport.send("<190>over tcp\n").expect("tcp send");
    assert_eq!(sent, "<190>over tcp\n");
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)).expect("bytes"),
        b"<190>over tcp\n"
    );
    server.join().expect("server thread");
}

#[test]
fn tcp_send_times_out_when_the_collector_never_closes() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        // Hold the connection open well past the client deadline.
        thread::sleep(Duration::from_millis(1500));
        drop(stream);
    });

    let transport = Transport::new(
        loopback(port)
            .with_protocol("tcp")
            .with_tcp_timeout(Duration::from_millis(100)),
    );
    let err = transport
        .send("<190>stalled\n")
        .expect_err("the collector never closes");
    assert!(matches!(
        err,
        SyslogError::Timeout {
            protocol: Protocol::Tcp
        }
    ));
    assert_eq!(err.to_string(), "syslog server tcp timeout");
    server.join().expect("server thread");
}

#[test]
fn tcp_connection_refused_propagates_verbatim() {
    // Bind-then-drop guarantees a port with no listener.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let transport = Transport::new(loopback(port).with_protocol("tcp"));
    let err = transport.send("<190>refused\n").expect_err("nobody listens");
    assert!(matches!(err, SyslogError::Network(_)));
}

#[test]
fn unknown_protocol_fails_without_touching_the_network() {
    let transport = Transport::new(
        TransportConfig::default()
            .with_target("host.name.invalid")
            .with_protocol("smtp"),
    );
    let err = transport.send("<190>undeliverable\n").expect_err("bad protocol");
    assert_eq!(
        err.to_string(),
        "format error: protocol not recognized, should be udp|tcp|tls"
    );
}

#[test]
fn resolver_failures_propagate_as_network_errors() {
    let transport = Transport::new(TransportConfig::default().with_target("host.name.invalid"));
    let err = transport
        .send("<190>lost\n")
        .expect_err(".invalid never resolves");
    assert!(matches!(err, SyslogError::Network(_)));
}

#[test]
fn a_malformed_trust_anchor_fails_before_any_connection() {
    // Port 1 would refuse instantly; the type error must win because
    // certificate material is checked before the socket is opened.
    let transport = Transport::new(
        loopback(1)
            .with_protocol("tls")
            .with_server_cert("this is not a certificate"),
    );
    let err = transport.send("<190>secure\n").expect_err("anchor is garbage");
    assert!(matches!(err, SyslogError::Type(_)));
    assert!(err.to_string().contains("TLS server cert 0"));
}

#[test]
fn a_half_configured_client_identity_fails_by_name() {
    let mut config = loopback(1).with_protocol("tls");
    config.tls_client_cert = Some("-----BEGIN CERTIFICATE-----".into());
    let transport = Transport::new(config);
    let err = transport
        .send("<190>secure\n")
        .expect_err("the key half is missing");
    assert!(matches!(err, SyslogError::Type(_)));
    assert!(err.to_string().contains("TLS client key"));
}

#[test]
fn tls_against_a_plain_listener_is_a_handshake_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let server = thread::spawn(move || {
        // Accept and immediately hang up; no TLS on this side.
        let _ = listener.accept();
    });

    let transport = Transport::new(
        loopback(port)
            .with_protocol("tls")
            .with_reject_unauthorized(false)
            .with_tcp_timeout(Duration::from_secs(5)),
    );
    let err = transport
        .send("<190>secure\n")
        .expect_err("the peer speaks no TLS");
    assert!(
        matches!(err, SyslogError::Tls(_) | SyslogError::Network(_)),
        "unexpected error: {err}"
    );
    server.join().expect("server thread");
}

#[test]
fn concurrent_sends_share_one_transport_without_serialising() {
    let (socket, port) = udp_listener();
    let transport = std::sync::Arc::new(Transport::new(loopback(port)));
    let handles: Vec<_> = (0..4)
        .map(|index| {
            let transport = std::sync::Arc::clone(&transport);
            thread::spawn(move || transport.send(&format!("<190>msg {index}\n")))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("sender thread").is_ok());
    }
    let mut buffer = [0u8; 256];
    for _ in 0..4 {
        socket.recv_from(&mut buffer).expect("each datagram arrives");
    }
}

#[test]
fn the_facade_routes_through_the_selected_formatter() {
    let (socket, port) = udp_listener();
    let facade = Syslog::new(loopback(port)).with_format(MessageFormat::Rfc5424);
    let sent = facade.send("TestMsg").expect("facade send");
    assert!(sent.starts_with("<190>1 "), "unexpected line: {sent}");
    assert!(sent.ends_with("BOMTestMsg\n"));

    let mut buffer = [0u8; 2048];
    let (len, _) = socket.recv_from(&mut buffer).expect("datagram arrives");
    assert_eq!(&buffer[..len], sent.as_bytes());
}

#[test]
fn the_default_facade_transmits_verbatim() {
    let (socket, port) = udp_listener();
    let facade = Syslog::new(loopback(port));
    let sent = facade.send("raw text, no framing").expect("facade send");
    assert_eq!(sent, "raw text, no framing");

    let mut buffer = [0u8; 256];
    let (len, _) = socket.recv_from(&mut buffer).expect("datagram arrives");
    assert_eq!(&buffer[..len], b"raw text, no framing");
}
