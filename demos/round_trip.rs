//! Encode a frame per protocol and decode what a receiver would see

use irpulse_core::{
    classifier::classify, decoder::decode, encoder::FrameBuilder, EdgeSequence, Protocol,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("irpulse Round Trip Example\n");

    let payload = [0x23, 0xCB, 0x26, 0x01];

    for protocol in [Protocol::Aeha, Protocol::Nec, Protocol::Sony] {
        let frame = FrameBuilder::new(protocol).bytes(&payload).build_struct();
        let train = irpulse_core::encoder::encode_frame(&frame)?;

        println!(
            "{}: {} pulses, {} us on air",
            protocol,
            train.len(),
            train.total_duration_us()
        );

        let edges = EdgeSequence::from_pulse_train(&train);
        let decoded = decode(protocol, &edges);
        println!("  decoded:    {}", decoded);
        println!("  classified: {}", classify(&edges));
        println!("  match:      {}\n", decoded == frame);
    }

    // NEC and AEHA units are close enough that timing alone picks AEHA
    println!("Classification follows AEHA, NEC, SONY priority.");

    Ok(())
}
