//! The stopwatch reports through the tracing pipeline

use std::io;
use std::sync::{Arc, Mutex};

use sundry::stopwatch::StopWatch;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_stopwatch_logs_start_laps_and_end() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut watch = StopWatch::new("snapshot");
        watch.lap("loaded");
    });

    let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(out.contains("START ["), "missing start marker: {out}");
    assert!(out.contains("snapshot"));
    assert!(out.contains("loaded"));
    assert!(out.contains("(overall time)"));
    assert!(out.contains("END ]"), "missing end marker: {out}");
}

#[test]
fn test_disabled_stopwatch_logs_nothing() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut watch = StopWatch::if_enabled("quiet", false);
        watch.lap("ignored");
    });

    assert!(capture.0.lock().unwrap().is_empty());
}
