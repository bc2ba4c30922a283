use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/acidentes.csv");
const MISSING_COLUMN_FIXTURE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/missing_column.csv");

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/regions")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_accident_dashboard"))
        .env("PORT", port.to_string())
        .env("ACCIDENTS_DATA_PATH", FIXTURE)
        .env("DASHBOARD_MIN_DATE", "2020-01-01")
        .env("DASHBOARD_MAX_DATE", "2020-09-30")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

/// Runs the server against `data_path` and returns its exit status, killing it
/// if it is still running after the deadline.
fn run_until_exit(data_path: &str) -> (ExitStatus, u16) {
    let port = pick_free_port();
    let mut child = Command::new(env!("CARGO_BIN_EXE_accident_dashboard"))
        .env("PORT", port.to_string())
        .env("ACCIDENTS_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(status) = child.try_wait().expect("wait on server") {
            return (status, port);
        }
        if TcpStream::connect(("127.0.0.1", port)).is_ok() {
            let _ = child.kill();
            let _ = child.wait();
            panic!("server started listening with dataset {data_path}");
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            let _ = child.wait();
            panic!("server did not exit with dataset {data_path}");
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_json(server: &TestServer, path: &str) -> Value {
    let response = Client::new()
        .get(format!("{}{path}", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success(), "GET {path} failed");
    response.json().await.unwrap()
}

fn counts(view: &Value) -> Vec<u64> {
    view["histogram"]["counts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|count| count.as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn http_dashboard_defaults_cover_whole_window() {
    let server = shared_server().await;
    let view = get_json(&server, "/api/dashboard").await;

    assert_eq!(view["start_date"], "2020-01-01");
    assert_eq!(view["end_date"], "2020-09-30");
    assert_eq!(view["summary"]["total"], 6);
    assert_eq!(view["summary"]["selected"], 6);
    assert_eq!(counts(&view).iter().sum::<u64>(), 6);
    assert_eq!(view["map"]["points"].as_array().unwrap().len(), 6);
    assert_eq!(view["map"]["color_domain"], serde_json::json!([0, 23]));
}

#[tokio::test]
async fn http_hour_selection_highlights_and_filters() {
    let server = shared_server().await;
    let view = get_json(
        &server,
        "/api/dashboard?start_date=2020-01-01&end_date=2020-01-31&hours=5,9",
    )
    .await;

    let counts = counts(&view);
    assert_eq!(counts[5], 2);
    assert_eq!(counts[20], 1);
    assert_eq!(view["summary"]["total"], 3);
    assert_eq!(view["summary"]["selected"], 2);
    assert_eq!(
        view["summary"]["selected_label"],
        "Total accidents in selected hours: 2"
    );

    let colors = view["histogram"]["colors"].as_array().unwrap();
    assert_eq!(colors[5], "#FFFFFF");
    assert_eq!(colors[9], "#FFFFFF");
    assert_eq!(colors[20], "#2E38A4");

    let points = view["map"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|point| point["color_value"] == 5));
    assert_eq!(points[0]["tooltip"]["date"], "15/01/2020");
}

#[tokio::test]
async fn http_empty_range_keeps_region_markers() {
    let server = shared_server().await;
    let view = get_json(
        &server,
        "/api/dashboard?start_date=2020-06-01&end_date=2020-06-30",
    )
    .await;

    assert_eq!(view["summary"]["total"], 0);
    assert!(counts(&view).iter().all(|count| *count == 0));
    assert!(view["map"]["points"].as_array().unwrap().is_empty());
    assert_eq!(view["map"]["regions"].as_array().unwrap().len(), 27);
}

#[tokio::test]
async fn http_region_moves_viewport() {
    let server = shared_server().await;
    let map = get_json(&server, "/api/map?region=SP").await;
    assert_eq!(map["viewport"]["lat"], -22.19);
    assert_eq!(map["viewport"]["lon"], -48.79);
    assert_eq!(map["viewport"]["zoom"], 7.0);
}

#[tokio::test]
async fn http_rejects_bad_filters() {
    let server = shared_server().await;
    let client = Client::new();

    for path in [
        "/api/dashboard?start_date=2020-02-30",
        "/api/dashboard?start_date=2020-01-01Tgarbage",
        "/api/dashboard?start_date=2020-05-01&end_date=2020-04-01",
        "/api/histogram?hours=25",
        "/api/map?region=XX",
    ] {
        let response = client
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        assert!(!response.text().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn http_date_bounds_clamp_end_to_start() {
    let server = shared_server().await;
    let bounds = get_json(
        &server,
        "/api/date-bounds?start_date=2020-03-10&end_date=2020-02-01",
    )
    .await;

    assert_eq!(bounds["start_date"], "2020-03-10");
    assert_eq!(bounds["end_date"], "2020-03-10");
    assert_eq!(bounds["start"]["max"], "2020-03-10");
    assert_eq!(bounds["end"]["min"], "2020-03-10");
    assert_eq!(bounds["end"]["max"], "2020-09-30");
}

#[tokio::test]
async fn http_chart_selection_is_deduplicated() {
    let server = shared_server().await;
    let response: Value = Client::new()
        .post(format!("{}/api/selection", server.base_url))
        .json(&serde_json::json!({ "click": 7, "selected": [3, 7] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(response["hours"], serde_json::json!([3, 7]));
}

#[tokio::test]
async fn http_index_serves_page() {
    let server = shared_server().await;
    let body = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("ACCIDENTS ON FEDERAL HIGHWAYS"));
}

#[test]
fn http_missing_dataset_file_aborts_startup() {
    let mut path = std::env::temp_dir();
    path.push(format!("accident_dashboard_absent_{}.csv", std::process::id()));
    let (status, port) = run_until_exit(&path.to_string_lossy());

    assert!(!status.success());
    assert!(TcpStream::connect(("127.0.0.1", port)).is_err());
}

#[test]
fn http_dataset_missing_column_aborts_startup() {
    let (status, port) = run_until_exit(MISSING_COLUMN_FIXTURE);

    assert!(!status.success());
    assert!(TcpStream::connect(("127.0.0.1", port)).is_err());
}
