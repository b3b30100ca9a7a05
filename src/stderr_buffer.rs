use std::io;
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    // A panic while holding the lock leaves plain strings behind; keep going.
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log lines are stored instead of being
/// printed to stderr, so they cannot corrupt the terminal form.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

pub fn is_active() -> bool {
    lock().is_some()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = lock();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `io::Write` handle for the log subscriber. Each formatted event arrives
/// as one write and is routed through [`warn`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferedStderr;

/// Writer factory for `tracing_subscriber::fmt().with_writer(...)`.
pub fn writer() -> BufferedStderr {
    BufferedStderr
}

impl io::Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let line = text.trim_end_matches(['\n', '\r']);
        if !line.is_empty() {
            warn(line.to_string());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_buffering_lifecycle() {
        activate();
        assert!(is_active());

        warn("first".to_string());
        warn(format!("second {}", 2));
        let mut w = writer();
        w.write_all(b"third line\n").unwrap();
        w.write_all(b"\n").unwrap();

        // Other tests may log concurrently; only check our own lines.
        let drained = drain();
        let ours: Vec<&str> = drained
            .iter()
            .map(String::as_str)
            .filter(|m| ["first", "second 2", "third line"].contains(m))
            .collect();
        assert_eq!(ours, vec!["first", "second 2", "third line"]);
        assert!(!drained.iter().any(|m| m.is_empty()));
        assert!(!is_active());
    }
}
