#![cfg(unix)]

use std::io::Read;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const SESSION_ENDED: &str = "Agent session ended.";

fn write_profile(dir: &Path, url: &str) {
    let profiles = format!(r#"[{{"name":"local","url":"{}","model_name":"m"}}]"#, url);
    std::fs::write(dir.join("config.json"), profiles).unwrap();
}

fn collect_stdout(child: &mut Child) -> Arc<Mutex<String>> {
    let mut stdout = child.stdout.take().unwrap();
    let output = Arc::new(Mutex::new(String::new()));
    let sink = output.clone();
    thread::spawn(move || {
        let mut buf = [0u8; 1024];
        while let Ok(n) = stdout.read(&mut buf) {
            if n == 0 {
                break;
            }
            sink.lock()
                .unwrap()
                .push_str(&String::from_utf8_lossy(&buf[..n]));
        }
    });
    output
}

fn wait_for(deadline: Duration, mut ready: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if ready() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    false
}

fn interrupt(child: &Child) {
    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

fn wait_for_exit(child: &mut Child) -> bool {
    let exited = wait_for(Duration::from_secs(5), || {
        matches!(child.try_wait(), Ok(Some(_)))
    });
    if !exited {
        let _ = child.kill();
        let _ = child.wait();
    }
    exited
}

#[test]
fn test_ctrl_c_at_prompt_exits() {
    let dir = tempfile::tempdir().unwrap();
    write_profile(dir.path(), "http://127.0.0.1:9/v1");

    let mut child = Command::new(env!("CARGO_BIN_EXE_hacker-agent"))
        .arg("--data-dir")
        .arg(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    // Held open so the prompt blocks on a read instead of seeing EOF.
    let _stdin = child.stdin.take().unwrap();
    let output = collect_stdout(&mut child);

    let prompted = wait_for(Duration::from_secs(20), || {
        output.lock().unwrap().contains(">>> ")
    });
    assert!(prompted, "no prompt: {}", output.lock().unwrap());
    thread::sleep(Duration::from_millis(300));

    interrupt(&child);

    assert!(wait_for_exit(&mut child), "agent kept running after SIGINT");
    let ended = wait_for(Duration::from_secs(2), || {
        output.lock().unwrap().contains(SESSION_ENDED)
    });
    assert!(ended, "unexpected output: {}", output.lock().unwrap());
    assert!(output.lock().unwrap().contains("shutting down"));
}

#[test]
fn test_ctrl_c_abandons_one_shot_request() {
    // Accepts the connection but never answers, so the request hangs.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let url = format!("http://{}/v1", listener.local_addr().unwrap());

    let dir = tempfile::tempdir().unwrap();
    write_profile(dir.path(), &url);

    let mut child = Command::new(env!("CARGO_BIN_EXE_hacker-agent"))
        .arg("--data-dir")
        .arg(dir.path())
        .args(["run", "list", "open", "ports"])
        .env("NO_PROXY", "127.0.0.1")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let output = collect_stdout(&mut child);

    let mut connections = Vec::new();
    let requested = wait_for(Duration::from_secs(20), || match listener.accept() {
        Ok((stream, _)) => {
            connections.push(stream);
            true
        }
        Err(_) => false,
    });
    assert!(requested, "no LLM request: {}", output.lock().unwrap());
    thread::sleep(Duration::from_millis(300));

    interrupt(&child);

    assert!(wait_for_exit(&mut child), "request kept running after SIGINT");
    let status = child.wait().unwrap();
    assert!(!status.success());
    let ended = wait_for(Duration::from_secs(2), || {
        output.lock().unwrap().contains(SESSION_ENDED)
    });
    assert!(ended, "unexpected output: {}", output.lock().unwrap());
    assert!(output.lock().unwrap().contains("shutting down"));
}
