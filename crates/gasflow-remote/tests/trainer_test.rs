//! RemoteTrainer against a scripted local HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use gasflow_control::ControlLoop;
use gasflow_core::config::{GasflowConfig, RemoteConfig};
use gasflow_core::models::{LinearCoefficients, Observation};
use gasflow_core::traits::{IFallbackModel, ILinearModel, ITrainingSink};
use gasflow_remote::{attach_trainer, RemoteTrainer};
use test_fixtures::{reading, ScriptedSource};

/// One request as the server saw it.
#[derive(Debug)]
struct Exchange {
    request_line: String,
    body: String,
}

/// Serve each canned `(status, body)` to one connection, in order.
fn serve(responses: Vec<(u16, &'static str)>) -> (RemoteConfig, JoinHandle<Vec<Exchange>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        let mut exchanges = Vec::new();
        for (status, body) in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                reason(status),
                body.len()
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            exchanges.push(Exchange {
                request_line: request_line.trim_end().to_string(),
                body: String::from_utf8(request_body).unwrap(),
            });
        }
        exchanges
    });

    let config = RemoteConfig {
        enabled: true,
        base_url: format!("http://{addr}"),
        timeout_ms: 2000,
    };
    (config, handle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        _ => "Unknown",
    }
}

/// A base URL nothing is listening on.
fn closed_port() -> RemoteConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    RemoteConfig {
        enabled: true,
        base_url: format!("http://{addr}"),
        timeout_ms: 500,
    }
}

#[test]
fn initialise_and_check_follow_status_codes() {
    let (config, server) = serve(vec![(200, "ok"), (200, "ML can be used."), (501, "no data")]);
    let mut trainer = RemoteTrainer::new(&config).unwrap();

    assert!(trainer.initialise());
    assert!(ILinearModel::is_available(&mut trainer));
    assert!(!IFallbackModel::is_available(&mut trainer));

    let exchanges = server.join().unwrap();
    assert_eq!(exchanges[0].request_line, "GET /initialise HTTP/1.1");
    assert_eq!(exchanges[1].request_line, "GET /check_ML HTTP/1.1");
}

#[test]
fn train_decodes_coefficients() {
    let (config, server) = serve(vec![(200, r#"{"LR_m": 1.3, "LR_c": 0.232}"#)]);
    let mut trainer = RemoteTrainer::new(&config).unwrap();

    assert_eq!(trainer.train(), Some(LinearCoefficients::new(1.3, 0.232)));
    assert_eq!(server.join().unwrap()[0].request_line, "GET /train HTTP/1.1");
}

#[test]
fn train_failures_are_none() {
    let (config, server) = serve(vec![
        (500, "LR does not satisfy requirements"),
        (200, r#"{"LR_m": 0, "LR_c": 0}"#),
        (200, "not json"),
    ]);
    let mut trainer = RemoteTrainer::new(&config).unwrap();

    assert_eq!(trainer.train(), None);
    assert_eq!(trainer.train(), None);
    assert_eq!(trainer.train(), None);
    server.join().unwrap();
}

#[test]
fn predict_posts_conditions_and_parses_text() {
    let (config, server) = serve(vec![(200, "42.5\n")]);
    let mut trainer = RemoteTrainer::new(&config).unwrap();

    assert_eq!(trainer.predict(1000.0, 50.0, 30.0), Some(42.5));

    let exchanges = server.join().unwrap();
    assert_eq!(exchanges[0].request_line, "POST /MR_predict HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&exchanges[0].body).unwrap();
    assert_eq!(body["supply_pressure"], 1000.0);
    assert_eq!(body["air_aperture"], 50.0);
    assert_eq!(body["output"], 30.0);
}

#[test]
fn predict_sentinels_are_none() {
    let (config, server) = serve(vec![
        (200, "0.0"),
        (500, "MR Prediction does not satisfy requirements."),
        (200, "garbage"),
    ]);
    let mut trainer = RemoteTrainer::new(&config).unwrap();

    for _ in 0..3 {
        assert_eq!(trainer.predict(1000.0, 50.0, 30.0), None);
    }
    server.join().unwrap();
}

#[test]
fn sink_posts_observations_and_finishes_dataset() {
    let (config, server) = serve(vec![(200, "Data received"), (200, "stored")]);
    let mut trainer = RemoteTrainer::new(&config).unwrap();

    assert!(trainer.record(&Observation::new(12.5, 1000.0, 50.0, 30.0)));
    assert!(trainer.finish("labelled_data"));

    let exchanges = server.join().unwrap();
    assert_eq!(exchanges[0].request_line, "POST /newdata HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&exchanges[0].body).unwrap();
    assert_eq!(body["gas_aperture"], 12.5);
    assert_eq!(body["output"], 30.0);
    assert_eq!(
        exchanges[1].request_line,
        "GET /finishdata/labelled_data HTTP/1.1"
    );
}

#[test]
fn unreachable_trainer_degrades_every_call() {
    let mut trainer = RemoteTrainer::new(&closed_port()).unwrap();

    assert!(!trainer.initialise());
    assert!(!ILinearModel::is_available(&mut trainer));
    assert_eq!(trainer.train(), None);
    assert_eq!(trainer.predict(1000.0, 50.0, 30.0), None);
    assert!(!trainer.record(&Observation::new(1.0, 1000.0, 50.0, 20.0)));
    assert!(!trainer.finish("labelled_data"));
}

#[test]
fn control_loop_runs_memory_only_without_trainer() {
    let trainer = RemoteTrainer::new(&closed_port()).unwrap();
    let mut config = GasflowConfig::default();
    config.control_loop.cycle_delay_ms = 0;
    let source = ScriptedSource::repeat(reading(1000.0, 50.0, 18.0, 30.0), 4);

    let mut control = ControlLoop::new(config, source)
        .with_linear(trainer.clone())
        .with_fallback(trainer.clone())
        .with_sink(trainer);

    let availability = control.start();
    assert!(availability.linear.is_none());
    assert!(!availability.fallback);

    let summary = control.run();
    assert_eq!(summary.cycles, 4);
    assert_eq!(summary.memory_cycles, 4);
    assert!(!summary.dataset_finished);
    assert_eq!(control.state().gas_aperture, 93.75);
}

#[test]
fn disabled_trainer_leaves_loop_memory_only() {
    let mut config = GasflowConfig::default();
    config.remote = RemoteConfig {
        enabled: false,
        ..closed_port()
    };
    let source = ScriptedSource::repeat(reading(1000.0, 50.0, 18.0, 30.0), 1);

    let mut control = attach_trainer(ControlLoop::new(config, source)).unwrap();

    let availability = control.start();
    assert!(availability.linear.is_none());
    assert!(!availability.fallback);
}

#[test]
fn enabled_trainer_is_initialised_and_backs_every_model() {
    let (remote, server) = serve(vec![
        (200, "initialised"),
        (200, "ML can be used."),
        (200, r#"{"LR_m": 1.3, "LR_c": 0.232}"#),
        (200, "ML can be used."),
    ]);
    let mut config = GasflowConfig::default();
    config.remote = remote;
    let source = ScriptedSource::repeat(reading(1000.0, 50.0, 18.0, 30.0), 1);

    let mut control = attach_trainer(ControlLoop::new(config, source)).unwrap();
    let availability = control.start();

    assert_eq!(availability.linear, Some(LinearCoefficients::new(1.3, 0.232)));
    assert!(availability.fallback);
    let lines: Vec<String> = server
        .join()
        .unwrap()
        .into_iter()
        .map(|e| e.request_line)
        .collect();
    assert_eq!(
        lines,
        vec![
            "GET /initialise HTTP/1.1",
            "GET /check_ML HTTP/1.1",
            "GET /train HTTP/1.1",
            "GET /check_ML HTTP/1.1",
        ]
    );
}
