//! Best-effort push of saved records to an external webhook.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::model::record::DailyRecord;

pub trait RemoteSync {
    /// Sends one record. Any network error or non-2xx response is a `TrackerError::Sync`.
    fn push(&self, record: &DailyRecord) -> Result<()>;

    fn is_enabled(&self) -> bool {
        true
    }

    /// Where records are sent, for display.
    fn target(&self) -> Option<&str> {
        None
    }
}

impl<T: RemoteSync + ?Sized> RemoteSync for Box<T> {
    fn push(&self, record: &DailyRecord) -> Result<()> {
        (**self).push(record)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn target(&self) -> Option<&str> {
        (**self).target()
    }
}

/// POSTs the record as JSON to a fixed URL. No authentication, no retry.
pub struct WebhookSync {
    client: Client,
    url: String,
}

impl WebhookSync {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::Sync(format!("could not build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl RemoteSync for WebhookSync {
    fn push(&self, record: &DailyRecord) -> Result<()> {
        debug!(url = %self.url, date = %record.date, "pushing record");
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .map_err(|e| TrackerError::Sync(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Sync(format!("webhook responded with {}", status)));
        }
        info!(date = %record.date, "record pushed to webhook");
        Ok(())
    }

    fn target(&self) -> Option<&str> {
        Some(&self.url)
    }
}

/// Used when no webhook is configured.
pub struct DisabledSync;

impl RemoteSync for DisabledSync {
    fn push(&self, _record: &DailyRecord) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

pub fn from_config(config: &TrackerConfig) -> Result<Box<dyn RemoteSync>> {
    match &config.webhook_url {
        Some(url) => Ok(Box::new(WebhookSync::new(url.clone(), config.sync_timeout())?)),
        None => Ok(Box::new(DisabledSync)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::roster::Roster;
    use chrono::NaiveDate;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn sample_record() -> DailyRecord {
        let roster = Roster::default();
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        DailyRecord::snapshot(date, &roster.staff, &roster.items)
    }

    /// Serves a single request with `status_line` and hands the request body back.
    fn one_shot_server(status_line: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let body = loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break String::new();
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length")
                                .then(|| v.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + length {
                        break String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).to_string();
                    }
                }
            };
            let response = format!("{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status_line);
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(body).unwrap();
        });

        (url, rx)
    }

    #[test]
    fn test_push_posts_record_json() {
        let (url, rx) = one_shot_server("HTTP/1.1 200 OK");
        let sync = WebhookSync::new(url, Duration::from_secs(5)).unwrap();
        let record = sample_record();

        sync.push(&record).unwrap();

        let body = rx.recv().unwrap();
        let sent: DailyRecord = serde_json::from_str(&body).unwrap();
        assert_eq!(sent, record);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(value.get("totalSalary").is_some());
    }

    #[test]
    fn test_non_success_status_is_sync_error() {
        let (url, _rx) = one_shot_server("HTTP/1.1 500 Internal Server Error");
        let sync = WebhookSync::new(url, Duration::from_secs(5)).unwrap();
        let result = sync.push(&sample_record());
        assert!(matches!(result, Err(TrackerError::Sync(_))));
    }

    #[test]
    fn test_unreachable_endpoint_is_sync_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let sync = WebhookSync::new(format!("http://{}/hook", addr), Duration::from_secs(2)).unwrap();
        assert!(matches!(sync.push(&sample_record()), Err(TrackerError::Sync(_))));
    }

    #[test]
    fn test_from_config_without_url_is_disabled() {
        let sync = from_config(&TrackerConfig::default()).unwrap();
        assert!(!sync.is_enabled());
        assert_eq!(sync.target(), None);
        assert!(sync.push(&sample_record()).is_ok());
    }

    #[test]
    fn test_from_config_with_url_targets_webhook() {
        let config = TrackerConfig {
            webhook_url: Some("http://127.0.0.1:9/hook".to_string()),
            ..TrackerConfig::default()
        };
        let sync = from_config(&config).unwrap();
        assert!(sync.is_enabled());
        assert_eq!(sync.target(), Some("http://127.0.0.1:9/hook"));
    }
}
