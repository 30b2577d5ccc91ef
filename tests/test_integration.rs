//! End-to-end tests for the receive → forecast → send loop.
//!
//! A scripted transport replays inbound frames and collects whatever the
//! loop sends back; the watchdog thresholds are zero so the run ends as
//! soon as the script is exhausted.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use ndarray::Array2;
use shooter_forecast::io::{FrameSink, Liveness, NullSink, OutboundFrame, Transport};
use shooter_forecast::pipeline::entities::DoorSet;
use shooter_forecast::pipeline::grids::FloorLayout;
use shooter_forecast::pipeline::predictor::{ConstantVelocity, ModelInput, ModelSet};
use shooter_forecast::pipeline::Session;
use shooter_forecast::{run_app, ForecastError, ForecastResult, RunStats};

#[derive(Default)]
struct ScriptedTransport {
    inbound: VecDeque<String>,
    sent: Vec<String>,
    fail_sends: bool,
}

impl ScriptedTransport {
    fn new(frames: Vec<String>) -> Self {
        Self {
            inbound: frames.into(),
            ..Self::default()
        }
    }
}

impl Transport for ScriptedTransport {
    fn receive(&mut self) -> io::Result<Option<String>> {
        Ok(self.inbound.pop_front())
    }

    fn send(&mut self, frame: &str) -> io::Result<()> {
        if self.fail_sends {
            return Err(io::Error::new(io::ErrorKind::Other, "peer gone"));
        }
        self.sent.push(frame.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: Vec<(f64, String)>,
}

impl FrameSink for RecordingSink {
    fn record(&mut self, since_event: f64, raw: &str) {
        self.frames.push((since_event, raw.to_string()));
    }
}

fn inbound(time: f64, since_event: f64, lookahead: usize, pos: (f64, f64, f64)) -> String {
    format!(
        "{time:?},{since_event:?},{lookahead};{:?},{:?},{:?},0,0,0,0,0,0,0,na,0,0,0,0,0;;;",
        pos.0, pos.1, pos.2
    )
}

fn instant_expiry() -> Liveness {
    Liveness::new(Duration::ZERO, Duration::ZERO, Duration::ZERO)
}

fn session(models: ModelSet) -> Session {
    Session::new(FloorLayout::default(), DoorSet::standard(), models)
}

fn run(session: &mut Session, transport: &mut ScriptedTransport) -> RunStats {
    run_app(session, transport, &mut NullSink, &mut instant_expiry()).unwrap()
}

#[test]
fn test_scripted_run_with_fallback_bucket() {
    let frames = vec![
        inbound(12.5, 0.0, 1, (210.0, 0.0, 900.0)),
        inbound(12.55, 0.0, 1, (215.2, 0.0, 892.7)),
        inbound(12.6, 0.0, 1, (227.8, 0.0, 890.6)),
    ];
    let mut transport = ScriptedTransport::new(frames);
    let mut session = session(ModelSet::constant_velocity());

    let stats = run(&mut session, &mut transport);

    assert_eq!(
        stats,
        RunStats {
            frames: 3,
            forecasts: 3,
            skipped: 0
        }
    );
    assert_eq!(
        transport.sent,
        vec![
            "12.5;210.0,210.0;0.0,0.0;900.0,900.0",
            "12.55;217.7,222.9;0.0,0.0;889.3,881.9",
            "12.6;236.5,254.3;0.0,0.0;886.1,876.7",
        ]
    );
}

#[test]
fn test_zero_lookahead_sends_empty_forecast() {
    let mut transport = ScriptedTransport::new(vec![inbound(3.0, 0.0, 0, (210.0, 0.0, 900.0))]);
    let mut session = session(ModelSet::constant_velocity());

    run(&mut session, &mut transport);

    assert_eq!(transport.sent, vec!["3.0;;;"]);
}

#[test]
fn test_trained_bucket_takes_over_once_history_allows() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&calls);
    let stub = move |input: &ModelInput| -> ForecastResult<Array2<f32>> {
        seen.borrow_mut().push(input.timesteps());
        Ok(Array2::from_shape_fn((input.horizon, 2), |(_, k)| {
            if k == 0 {
                1.0
            } else {
                0.0
            }
        }))
    };
    let models = ModelSet::new(
        Box::new(stub),
        Box::new(ConstantVelocity),
        Box::new(ConstantVelocity),
    );

    let frames = (0_u32..12)
        .map(|i| {
            let i = f64::from(i);
            inbound(i, 0.0, 5, (210.0, 0.0, 900.0 - 3.0 * i))
        })
        .collect();
    let mut transport = ScriptedTransport::new(frames);
    let mut session = session(models);

    let stats = run(&mut session, &mut transport);

    assert_eq!(stats.forecasts, 12);
    // History holds 10 ticks from the tenth frame on
    assert_eq!(*calls.borrow(), vec![10, 10, 10]);
    for raw in &transport.sent {
        let frame: OutboundFrame = raw.parse().unwrap();
        assert_eq!(frame.points.len(), 10);
    }
    // One cell east per step, rotated back into world axes
    let zeros = ["0.0"; 10].join(",");
    assert_eq!(
        transport.sent[9..],
        [
            format!(
                "9.0;215.2,220.5,225.7,230.9,236.1,241.4,246.6,251.8,257.1,262.3;{zeros};\
                 865.8,858.5,851.1,843.8,836.5,829.1,821.8,814.5,807.2,799.8"
            ),
            format!(
                "10.0;215.2,220.4,225.6,230.9,236.1,241.3,246.5,251.8,257.0,262.2;{zeros};\
                 862.8,855.5,848.1,840.8,833.5,826.2,818.8,811.5,804.2,796.8"
            ),
            format!(
                "11.0;215.3,220.5,225.7,231.0,236.2,241.4,246.6,251.9,257.1,262.3;{zeros};\
                 859.5,852.2,844.9,837.6,830.2,822.9,815.6,808.3,800.9,793.6"
            ),
        ]
    );
}

#[test]
fn test_malformed_frames_are_skipped() {
    let frames = vec![
        inbound(1.0, 0.0, 1, (210.0, 0.0, 900.0)),
        "garbage".to_string(),
        "1.0,0.0,1;1,2,3;;;".to_string(),
        inbound(2.0, 0.0, 1, (210.0, 0.0, 900.0)),
    ];
    let mut transport = ScriptedTransport::new(frames);
    let mut session = session(ModelSet::constant_velocity());

    let stats = run(&mut session, &mut transport);

    assert_eq!(stats.frames, 4);
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.forecasts, 2);
    assert_eq!(session.ticks(), 2);
}

#[test]
fn test_oversized_lookahead_skips_tick() {
    let huge = "1.0,0.0,1e19;210.0,0.0,900.0,0,0,0,0,0,0,0,na,0,0,0,0,0;;;".to_string();
    let mut transport = ScriptedTransport::new(vec![
        huge,
        inbound(2.0, 0.0, 1, (210.0, 0.0, 900.0)),
    ]);
    let mut session = session(ModelSet::constant_velocity());

    let stats = run(&mut session, &mut transport);

    assert_eq!(stats.frames, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.forecasts, 1);
    assert_eq!(session.ticks(), 1);
    assert_eq!(transport.sent, vec!["2.0;210.0,210.0;0.0,0.0;900.0,900.0"]);
}

#[test]
fn test_wrong_door_count_skips_tick() {
    let bad = "1.0,0.0,1;210.0,0.0,900.0,0,0,0,0,0,0,0,na,0,0,0,0,0;;1,0,1;".to_string();
    let mut transport = ScriptedTransport::new(vec![bad]);
    let mut session = session(ModelSet::constant_velocity());

    let stats = run(&mut session, &mut transport);

    assert_eq!(stats.skipped, 1);
    assert!(transport.sent.is_empty());
    assert_eq!(session.ticks(), 0);
}

#[test]
fn test_failing_predictor_skips_tick() {
    let broken = |_: &ModelInput| -> ForecastResult<Array2<f32>> {
        Err(ForecastError::Predictor {
            bucket: 5,
            reason: "model unavailable".to_string(),
        })
    };
    let models = ModelSet::new(
        Box::new(broken),
        Box::new(ConstantVelocity),
        Box::new(ConstantVelocity),
    );
    let frames = (0_u32..12)
        .map(|i| inbound(f64::from(i), 0.0, 5, (210.0, 0.0, 900.0)))
        .collect();
    let mut transport = ScriptedTransport::new(frames);
    let mut session = session(models);

    let stats = run(&mut session, &mut transport);

    // The short model is picked from the tenth tick on
    assert_eq!(stats.skipped, 3);
    assert_eq!(stats.forecasts, 9);
    assert_eq!(session.ticks(), 12);
}

#[test]
fn test_wrong_output_shape_skips_tick() {
    let narrow = |input: &ModelInput| -> ForecastResult<Array2<f32>> {
        Ok(Array2::zeros((input.horizon, 3)))
    };
    let models = ModelSet::new(
        Box::new(ConstantVelocity),
        Box::new(narrow),
        Box::new(ConstantVelocity),
    );
    let frames = (0_u32..21)
        .map(|i| inbound(f64::from(i), 0.0, 10, (210.0, 0.0, 900.0)))
        .collect();
    let mut transport = ScriptedTransport::new(frames);
    let mut session = session(models);

    let stats = run(&mut session, &mut transport);

    // Ticks 20 and 21 reach the medium bucket
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.forecasts, 19);
}

#[test]
fn test_send_failures_do_not_stop_the_loop() {
    let mut transport = ScriptedTransport::new(vec![
        inbound(1.0, 0.0, 1, (210.0, 0.0, 900.0)),
        inbound(2.0, 0.0, 1, (210.0, 0.0, 900.0)),
    ]);
    transport.fail_sends = true;
    let mut session = session(ModelSet::constant_velocity());

    let stats = run(&mut session, &mut transport);

    assert_eq!(stats.frames, 2);
    assert_eq!(stats.forecasts, 0);
    assert_eq!(session.ticks(), 2);
}

#[test]
fn test_sink_sees_every_parsed_frame() {
    let frames = vec![
        inbound(1.0, 0.0, 1, (210.0, 0.0, 900.0)),
        "garbage".to_string(),
        inbound(2.0, 0.5, 1, (210.0, 0.0, 900.0)),
    ];
    let mut transport = ScriptedTransport::new(frames.clone());
    let mut session = session(ModelSet::constant_velocity());
    let mut sink = RecordingSink::default();

    run_app(&mut session, &mut transport, &mut sink, &mut instant_expiry()).unwrap();

    assert_eq!(
        sink.frames,
        vec![(0.0, frames[0].clone()), (0.5, frames[2].clone())]
    );
}

#[test]
fn test_robot_section_is_accepted() {
    let frame = "1.0,0.0,1;210.0,0.0,900.0,0,0,0,0,0,0,0,na,0,0,0,0,0;;;;1,0,10,0,20,30,0,40";
    let mut transport = ScriptedTransport::new(vec![frame.to_string()]);
    let mut session = session(ModelSet::constant_velocity());

    let stats = run(&mut session, &mut transport);

    assert_eq!(stats.forecasts, 1);
}
