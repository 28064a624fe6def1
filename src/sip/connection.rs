//! TCP-backed SIP2 session.
//!
//! [`TcpConnector`] resolves the address and opens the stream with a connect
//! timeout; the dispatcher layer deliberately carries no timeout policy of
//! its own. [`SipConnection`] then frames requests and reads `\r`-terminated
//! responses.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{Result, SipshError};
use crate::sip::message::{Message, TERMINATOR};
use crate::sip::{Connector, SipSession};

fn network_err(message: impl Into<String>) -> SipshError {
    SipshError::Network {
        message: message.into(),
    }
}

/// Opens [`SipConnection`]s over plain TCP.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    /// Applied to the initial connect only; established-session reads block.
    pub connect_timeout: Duration,
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Connector for TcpConnector {
    fn connect(&self, server: &str, port: u16, institution: &str) -> Result<Box<dyn SipSession>> {
        let addrs: Vec<_> = (server, port)
            .to_socket_addrs()
            .map_err(|e| network_err(format!("cannot resolve {}: {}", server, e)))?
            .collect();

        let mut last_err = network_err(format!("no addresses for {}", server));
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => {
                    tracing::debug!("connected to {} ({})", addr, server);
                    return Ok(Box::new(SipConnection::new(stream, institution)));
                }
                Err(e) => last_err = network_err(format!("{}: {}", addr, e)),
            }
        }
        Err(last_err)
    }
}

/// A live TCP session speaking SIP2 frames.
pub struct SipConnection {
    stream: BufReader<TcpStream>,
    institution: String,
}

impl SipConnection {
    fn new(stream: TcpStream, institution: &str) -> Self {
        Self {
            stream: BufReader::new(stream),
            institution: institution.to_string(),
        }
    }

    /// Write one request frame and read one response frame.
    fn exchange(&mut self, request: &Message) -> Result<Message> {
        let mut frame = request.encode();
        frame.push(TERMINATOR);
        tracing::debug!("send: {:?}", frame);

        let stream = self.stream.get_mut();
        stream
            .write_all(frame.as_bytes())
            .and_then(|_| stream.flush())
            .map_err(|e| network_err(format!("send failed: {}", e)))?;

        let mut buf = Vec::new();
        let n = self
            .stream
            .read_until(TERMINATOR as u8, &mut buf)
            .map_err(|e| network_err(format!("receive failed: {}", e)))?;
        if n == 0 {
            return Err(network_err("server closed the connection"));
        }

        let text = String::from_utf8_lossy(&buf);
        let text = text.trim_end_matches(['\r', '\n']);
        tracing::debug!("recv: {:?}", text);
        Message::parse(text)
    }

    /// 18-character SIP2 transaction date: YYYYMMDD, 4-space zone, HHMMSS.
    fn transaction_date() -> String {
        chrono::Local::now().format("%Y%m%d    %H%M%S").to_string()
    }
}

impl SipSession for SipConnection {
    fn login(&mut self, username: &str, password: &str, location_code: &str) -> Result<bool> {
        let request = Message::new("93")
            .with_fixed("uid_algorithm", "0")
            .with_fixed("pwd_algorithm", "0")
            .with_field("CN", username)
            .with_field("CO", password)
            .with_field("CP", location_code);
        let response = self.exchange(&request)?;
        Ok(response.fixed_field("ok") == Some("1"))
    }

    fn sc_status(&mut self) -> Result<Message> {
        let request = Message::new("99")
            .with_fixed("status_code", "0")
            .with_fixed("max_print_width", "030")
            .with_fixed("protocol_version", "2.00");
        self.exchange(&request)
    }

    fn patron_info(&mut self, barcode: &str) -> Result<Message> {
        let request = Message::new("63")
            .with_fixed("language", "000")
            .with_fixed("transaction_date", Self::transaction_date())
            .with_fixed("summary", " ".repeat(10))
            .with_field("AO", self.institution.clone())
            .with_field("AA", barcode);
        self.exchange(&request)
    }
}
