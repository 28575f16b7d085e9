use serde_json::Value;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

struct Script {
    create_status: u16,
    delete_status: u16,
    poll_status: u16,
    polls: VecDeque<Value>,
    last_poll: Option<Value>,
    requests: Vec<RecordedRequest>,
}

/// In-process stand-in for the query-job API.
///
/// Serves one connection at a time and closes it after each response. Poll
/// responses are served in order; the last one repeats once the script runs
/// out.
#[derive(Clone)]
pub struct MockApi {
    addr: SocketAddr,
    script: Arc<Mutex<Script>>,
}

impl MockApi {
    pub fn start(polls: Vec<Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind mock api");
        let addr = listener.local_addr().expect("mock api has no address");

        let script = Arc::new(Mutex::new(Script {
            create_status: 200,
            delete_status: 204,
            poll_status: 200,
            polls: polls.into(),
            last_poll: None,
            requests: Vec::new(),
        }));

        thread::spawn({
            let script = script.clone();
            move || {
                for stream in listener.incoming() {
                    let Ok(stream) = stream else {
                        continue;
                    };
                    handle(stream, &script);
                }
            }
        });

        Self { addr, script }
    }

    pub fn fail_create(self, status: u16) -> Self {
        self.script.lock().unwrap().create_status = status;
        self
    }

    pub fn fail_polls(self, status: u16) -> Self {
        self.script.lock().unwrap().poll_status = status;
        self
    }

    pub fn fail_delete(self, status: u16) -> Self {
        self.script.lock().unwrap().delete_status = status;
        self
    }

    pub fn address(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests().iter().filter(|r| r.method == method).count()
    }
}

fn handle(stream: TcpStream, script: &Mutex<Script>) {
    let Some(request) = read_request(&stream) else {
        return;
    };

    let (status, body) = {
        let mut script = script.lock().unwrap();
        let routed = route(&mut script, &request);
        script.requests.push(request);
        routed
    };

    let _ = write_response(&stream, status, &body);
}

fn route(script: &mut Script, request: &RecordedRequest) -> (u16, String) {
    let is_job = request.path.contains("/queryjobs/");

    match (request.method.as_str(), is_job) {
        ("POST", false) if script.create_status == 200 => (200, r#"{"id":"job-1"}"#.to_string()),
        ("POST", false) => (script.create_status, "create rejected".to_string()),
        ("GET", true) if script.poll_status != 200 => (script.poll_status, "poll failed".to_string()),
        ("GET", true) => {
            if let Some(next) = script.polls.pop_front() {
                script.last_poll = Some(next);
            }
            match &script.last_poll {
                Some(poll) => (200, poll.to_string()),
                None => (404, "no such job".to_string()),
            }
        }
        ("DELETE", true) => (script.delete_status, String::new()),
        _ => (404, "not found".to_string()),
    }
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((k, v)) = header.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn write_response(mut stream: &TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    let reason = match status {
        200 => "OK",
        204 => "No Content",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Error",
    };

    // 204 must not carry a body.
    let body = if status == 204 { "" } else { body };

    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    )?;
    stream.flush()
}

/// A finished (or, for live jobs, caught-up) poll response.
pub fn done_response(events: Value, is_aggregate: bool) -> Value {
    serde_json::json!({
        "done": true,
        "events": events,
        "metaData": {
            "isAggregate": is_aggregate,
            "pollAfter": 10,
            "totalWork": 1,
            "workDone": 1
        }
    })
}

pub fn pending_response(total_work: u64, work_done: u64) -> Value {
    serde_json::json!({
        "done": false,
        "events": [],
        "metaData": {
            "isAggregate": false,
            "pollAfter": 10,
            "totalWork": total_work,
            "workDone": work_done
        }
    })
}
