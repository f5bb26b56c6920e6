//! Record from a simulated receive line and send the result back out

use irpulse_core::{
    device::sim::{LoopbackTransmitter, ScriptedLine},
    encoder::FrameBuilder,
    sampler::{EdgeSampler, SamplerConfig},
    transceiver::{RecordOutcome, Recorder, Sender},
    EdgeSequence, Level, Protocol, PulseTrain, RawEdge,
};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("irpulse Loopback Capture Example\n");

    // A remote press: one SONY frame followed by silence
    let train = FrameBuilder::new(Protocol::Sony)
        .bytes(&[0x95, 0x01])
        .build()?;
    let mut script = EdgeSequence::from_pulse_train(&train);
    script.push(RawEdge::new(45_000, Level::Low));

    let mut line = ScriptedLine::new(script);
    let recorder = Recorder::new(EdgeSampler::new(SamplerConfig {
        line: 4,
        poll_interval: Duration::from_millis(10),
    }));

    let recording = match recorder.record(&mut line, 2_000)? {
        RecordOutcome::Captured(recording) => recording,
        RecordOutcome::Failed(status) => {
            println!("Capture failed: {:?}", status);
            return Ok(());
        }
    };

    println!("Captured {} edges", recording.edges.len());
    println!("Decoded: {}", recording.frame);

    // Replay the raw capture
    let replay = PulseTrain::from_edges(&recording.edges);
    let mut tx = LoopbackTransmitter::new().with_busy_polls(5);
    Sender::default().send(&mut tx, &replay)?;

    for (line, sent) in tx.sent() {
        println!("Sent {} pulses on line {}", sent.len(), line);
    }

    Ok(())
}
