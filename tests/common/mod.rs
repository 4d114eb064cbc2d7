//! A DICT server on a local TCP port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

//------------ Thesaurus -----------------------------------------------------

/// The words the server knows about and how long it takes for each.
pub const THESAURUS: &[(&str, &[&str], u64)] = &[
    ("run", &["dash", "sprint", "jog"], 150),
    ("fast", &["quick", "rapid"], 100),
    ("big", &["large", "huge"], 50),
    ("house", &["home", "dwelling"], 0),
];

//------------ Server --------------------------------------------------------

/// A running server.
pub struct Server {
    port: u16,
    accepted: Arc<AtomicUsize>,
}

impl Server {
    /// Starts a server on an ephemeral port of 127.0.0.1.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(stream));
            }
        });
        Self { port, accepted }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Number of connections accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

async fn serve(stream: TcpStream) {
    let mut stream = BufReader::new(stream);
    let banner = b"220 localhost dictd <auth.mime> <1.1@localhost>\r\n";
    if stream.get_mut().write_all(banner).await.is_err() {
        return;
    }
    let mut line = String::new();
    if stream.read_line(&mut line).await.unwrap_or(0) == 0 {
        return;
    }
    let word = line
        .trim_end()
        .strip_prefix("define moby-thesaurus ")
        .unwrap_or_default()
        .to_string();
    let reply = match THESAURUS.iter().find(|(w, _, _)| *w == word) {
        Some((_, synonyms, delay)) => {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
            format!(
                "150 1 definitions retrieved\r\n\
                 151 \"{word}\" moby-thesaurus \"Moby Thesaurus II by \
                 Grady Ward, 1.0\"\r\n\r\n\
                 {count} Moby Thesaurus words for \"{word}\":\r\n   \
                 {list}\r\n.\r\n250 ok\r\n",
                word = word,
                count = synonyms.len(),
                list = synonyms.join(", "),
            )
        }
        None if word == "vanish" => return,
        None => "552 no match [d/n]\r\n".to_string(),
    };
    if stream.get_mut().write_all(reply.as_bytes()).await.is_err() {
        return;
    }
    let mut rest = Vec::new();
    let _ = stream.read_to_end(&mut rest).await;
}
