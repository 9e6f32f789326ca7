use link::{InProcessLink, PushLink};

#[test]
fn in_process_delivers_in_order() {
    let (tx, mut link) = InProcessLink::channel();
    tx.send("one".to_string()).expect("send");
    tx.send("two".to_string()).expect("send");
    assert_eq!(link.next_message().expect("recv"), Some("one".to_string()));
    assert_eq!(link.next_message().expect("recv"), Some("two".to_string()));
}

#[test]
fn in_process_closes_when_sender_dropped() {
    let (tx, mut link) = InProcessLink::channel();
    tx.send("last".to_string()).expect("send");
    drop(tx);
    assert_eq!(link.next_message().expect("recv"), Some("last".to_string()));
    assert_eq!(link.next_message().expect("recv"), None);
}

#[test]
fn in_process_closes_on_shutdown_while_sender_lives() {
    let (tx, mut link) = InProcessLink::channel();
    link.shutdown().signal();
    // The sender is still alive and silent; only the flag ends the read.
    assert_eq!(link.next_message().expect("close"), None);
    drop(tx);
}

mod sse {
    use link::{PushLink, Shutdown, SseLink};
    use std::io::{self, Cursor, Read};

    fn link_over(body: &str) -> SseLink {
        SseLink::new(
            Box::new(Cursor::new(body.as_bytes().to_vec())),
            Shutdown::new(),
        )
    }

    /// Replays scripted read results; `None` steps time out like a socket
    /// with a read deadline, and the script's end reads as EOF.
    struct StutterReader {
        script: Vec<Option<Vec<u8>>>,
        position: usize,
    }

    impl StutterReader {
        fn new(script: Vec<Option<Vec<u8>>>) -> Self {
            Self {
                script,
                position: 0,
            }
        }
    }

    impl Read for StutterReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let step = self.script.get(self.position).cloned();
            self.position += 1;
            match step {
                Some(Some(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(None) => Err(io::Error::new(io::ErrorKind::WouldBlock, "timed out")),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn frames_split_on_blank_lines() {
        let mut link = link_over("data: {\"a\":1}\n\ndata: {\"b\":2}\n\n");
        assert_eq!(
            link.next_message().expect("frame"),
            Some("{\"a\":1}".to_string())
        );
        assert_eq!(
            link.next_message().expect("frame"),
            Some("{\"b\":2}".to_string())
        );
        assert_eq!(link.next_message().expect("eof"), None);
    }

    #[test]
    fn ignores_comments_and_event_fields() {
        let mut link = link_over(": keepalive\nevent: telemetry\nid: 7\ndata: {\"a\":1}\n\n");
        assert_eq!(
            link.next_message().expect("frame"),
            Some("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn multi_line_data_joins_with_newline() {
        let mut link = link_over("data: one\ndata: two\n\n");
        assert_eq!(link.next_message().expect("frame"), Some("one\ntwo".to_string()));
    }

    #[test]
    fn crlf_terminated_lines_parse() {
        let mut link = link_over("data: {\"a\":1}\r\n\r\n");
        assert_eq!(
            link.next_message().expect("frame"),
            Some("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn eof_mid_frame_reports_close() {
        let mut link = link_over("data: {\"a\":1}");
        // Frame never terminated by a blank line before the stream ended.
        assert_eq!(link.next_message().expect("eof"), None);
    }

    #[test]
    fn frame_survives_a_read_timeout_mid_line() {
        let reader = StutterReader::new(vec![
            Some(b"data: {\"a\"".to_vec()),
            None,
            Some(b":1}\n\n".to_vec()),
        ]);
        let mut link = SseLink::new(Box::new(reader), Shutdown::new());
        assert_eq!(
            link.next_message().expect("frame"),
            Some("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn shutdown_closes_a_stalled_stream() {
        // Every read times out, as on a backend that has gone quiet.
        let reader = StutterReader::new(vec![None, None, None]);
        let shutdown = Shutdown::new();
        let mut link = SseLink::new(Box::new(reader), shutdown.clone());
        shutdown.signal();
        assert_eq!(link.next_message().expect("close"), None);
    }
}
