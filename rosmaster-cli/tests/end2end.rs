use assert_cmd::prelude::*;
use assert_fs::{prelude::*, TempDir};
use httpmock::prelude::*;
use predicates::prelude::*;
use rosmaster::{CallerId, MasterCall};
use std::process::Command;

const SERVICE_CLIENTS_XML: &str = r#"<?xml version="1.0"?>
<methodResponse><params><param><value><array><data>
<value><int>1</int></value>
<value><string>authorized clients</string></value>
<value><array><data><value><string>10.0.0.1</string></value></data></array></value>
</data></array></value></param></params></methodResponse>"#;

const PUBLISHED_TOPICS_XML: &str = r#"<?xml version="1.0"?>
<methodResponse><params><param><value><array><data>
<value><int>1</int></value>
<value><string>current topics</string></value>
<value><array><data><value><array><data><value><string>/rosout</string></value><value><string>rosgraph_msgs/Log</string></value></data></array></value></data></array></value>
</data></array></value></param></params></methodResponse>"#;

const FAULT_XML: &str = r#"<?xml version="1.0"?>
<methodResponse><fault><value><struct>
<member><name>faultCode</name><value><int>1</int></value></member>
<member><name>faultString</name><value><string>boom</string></value></member>
</struct></value></fault></methodResponse>"#;

const LOOSE_XML: &str = r#"<?xml version="1.0"?>
<methodResponse><params><param><value><array><data>
<value><string>1</string></value>
<value><boolean>0</boolean></value>
<value><double>10000000000000000.0</double></value>
<value><string>extra</string></value>
</data></array></value></param></params></methodResponse>"#;

/// ensure the `ros-xmlrpc` bin is fresh and build a `Command` for it,
/// without any master URI leaking in from the test environment
fn xmlrpc_command() -> Command {
    let mut cmd = Command::cargo_bin("ros-xmlrpc").expect("get ros-xmlrpc binary");
    cmd.env_remove("ROS_MASTER_URI").env_remove("RUST_LOG");
    cmd
}

fn request_body(call: &MasterCall, caller_id: &str) -> String {
    let mut body = Vec::new();
    call.to_request(&CallerId::new(caller_id))
        .write_as_xml(&mut body)
        .expect("write request");
    String::from_utf8(body).expect("utf8 request")
}

fn mock_master<'a>(
    server: &'a MockServer,
    body: Option<String>,
    response: &'static str,
) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        let when = when.method(POST).path("/");
        if let Some(body) = body {
            when.body(body);
        }
        then.status(200)
            .header("content-type", "text/xml")
            .body(response);
    })
}

#[test]
fn exists() {
    xmlrpc_command();
}

#[test]
fn bare_command_gives_help() {
    xmlrpc_command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unrecognized_command_exits_with_usage() {
    xmlrpc_command()
        .args(["fooBar", "svc"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unrecognized command: fooBar"))
        .stdout(predicate::str::contains("getServiceClients"))
        .stdout(predicate::str::contains("getPublishedTopics"));
}

#[test]
fn unrecognized_command_makes_no_call() {
    let server = MockServer::start();
    let mock = mock_master(&server, None, SERVICE_CLIENTS_XML);

    let uri = server.base_url();

    xmlrpc_command()
        .args(["fooBar", "-m", uri.as_str(), "svc"])
        .assert()
        .code(1);

    mock.assert_hits(0);
}

#[test]
fn service_name_is_required() {
    xmlrpc_command()
        .args(["getServiceClients", "-m", "http://localhost:11311"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<SERVICE>"));
}

#[test]
fn flags_before_the_command_are_a_usage_error() {
    xmlrpc_command()
        .args(["-c", "X", "getServiceClients", "svc"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Unrecognized command").not());
}

#[test]
fn unset_master_uri_is_a_config_error() {
    xmlrpc_command()
        .args(["getPublishedTopics"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ROS_MASTER_URI"));
}

#[test]
fn invalid_master_uri_is_a_config_error() {
    xmlrpc_command()
        .args(["getPublishedTopics", "-m", "localhost:11311"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported scheme"));
}

#[test]
fn get_service_clients_round_trip() {
    let server = MockServer::start();
    let mock = mock_master(
        &server,
        Some(request_body(&MasterCall::service_clients("svc"), "X")),
        SERVICE_CLIENTS_XML,
    );

    let uri = server.base_url();

    xmlrpc_command()
        .args([
            "getServiceClients",
            "--caller_id",
            "X",
            "--master_uri",
            uri.as_str(),
            "svc",
        ])
        .assert()
        .success()
        .stdout("getServiceClients returned code=1, msg=authorized clients, val=['10.0.0.1']\n");

    mock.assert();
}

#[test]
fn get_published_topics_defaults_from_environment() {
    let server = MockServer::start();
    let mock = mock_master(
        &server,
        Some(request_body(&MasterCall::published_topics(None), "anon")),
        PUBLISHED_TOPICS_XML,
    );

    xmlrpc_command()
        .env("ROS_MASTER_URI", server.base_url())
        .args(["getPublishedTopics"])
        .assert()
        .success()
        .stdout(
            "getPublishedTopics returned code=1, msg=current topics, \
             val=[['/rosout', 'rosgraph_msgs/Log']]\n",
        );

    mock.assert();
}

#[test]
fn config_file_supplies_fallbacks() {
    let server = MockServer::start();
    let mock = mock_master(
        &server,
        Some(request_body(
            &MasterCall::published_topics(Some("/ns".into())),
            "/from_config",
        )),
        PUBLISHED_TOPICS_XML,
    );

    let dir = TempDir::new().unwrap();
    let cfg = dir.child("rosmaster.toml");
    cfg.write_str(&format!(
        "master-uri = '{}'\ncaller-id = '/from_config'\ntimeout-secs = 10\n",
        server.base_url()
    ))
    .unwrap();

    xmlrpc_command()
        .args(["getPublishedTopics", "--config"])
        .arg(cfg.path())
        .arg("/ns")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("getPublishedTopics returned code=1"));

    mock.assert();
}

#[test]
fn remote_fault_fails_the_run() {
    let server = MockServer::start();
    mock_master(&server, None, FAULT_XML);
    let uri = server.base_url();

    xmlrpc_command()
        .args(["getServiceClients", "-m", uri.as_str(), "svc"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("boom"));
}

#[test]
fn unreachable_master_fails_the_run() {
    xmlrpc_command()
        .args([
            "getServiceClients",
            "-m",
            "http://127.0.0.1:1",
            "--timeout",
            "5",
            "svc",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed talking to the master"));
}

#[test]
fn response_is_printed_without_checks() {
    let server = MockServer::start();
    let mock = mock_master(&server, None, LOOSE_XML);
    let uri = server.base_url();

    xmlrpc_command()
        .args(["getPublishedTopics", "-m", uri.as_str()])
        .assert()
        .success()
        .stdout("getPublishedTopics returned code=1, msg=False, val=1e+16\n");

    mock.assert();
}
