use crate::constants::{
    AMPLITUDE_SMOOTHING, ANALYSER_FFT_SIZE, DRY_GAIN, MASTER_GAIN, REVERB_DECAY, REVERB_SECONDS,
    REVERB_SEEDS, REVERB_WET_GAIN,
};
use crate::core::{reverb_impulse, AmplitudeFollower, NoteTrigger};
use anyhow::anyhow;
use web_sys as web;

/// Monophonic sine synth: one always-running oscillator shaped by a gain
/// envelope, with a dry path and a convolution reverb send. An analyser on
/// the master bus feeds the amplitude follower that drives the visuals.
pub struct Synth {
    ctx: web::AudioContext,
    osc: web::OscillatorNode,
    envelope: web::GainNode,
    analyser: web::AnalyserNode,
    analyser_buf: Vec<f32>,
    follower: AmplitudeFollower,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(|e| anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn connect(from: &web::AudioNode, to: &web::AudioNode) -> anyhow::Result<()> {
    from.connect_with_audio_node(to)
        .map(|_| ())
        .map_err(|e| anyhow!("connect error: {:?}", e))
}

fn create_reverb(ctx: &web::AudioContext) -> anyhow::Result<web::ConvolverNode> {
    let reverb = web::ConvolverNode::new(ctx).map_err(|e| anyhow!("ConvolverNode error: {:?}", e))?;
    let sr = ctx.sample_rate();
    let len = ((sr * REVERB_SECONDS) as u32).max(1);
    let ir = ctx
        .create_buffer(REVERB_SEEDS.len() as u32, len, sr)
        .map_err(|e| anyhow!("impulse buffer error: {:?}", e))?;
    for (ch, seed) in REVERB_SEEDS.iter().enumerate() {
        let mut samples = reverb_impulse(len as usize, REVERB_DECAY, *seed);
        ir.copy_to_channel(&mut samples, ch as i32)
            .map_err(|e| anyhow!("impulse copy error: {:?}", e))?;
    }
    reverb.set_buffer(Some(&ir));
    Ok(reverb)
}

impl Synth {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow!("AudioContext error: {:?}", e))?;

        let osc = web::OscillatorNode::new(&ctx).map_err(|e| anyhow!("OscillatorNode error: {:?}", e))?;
        osc.set_type(web::OscillatorType::Sine);
        // Silent until the first note schedules the envelope
        let envelope = create_gain(&ctx, 0.0, "Envelope")?;
        let dry = create_gain(&ctx, DRY_GAIN, "Dry")?;
        let wet = create_gain(&ctx, REVERB_WET_GAIN, "Reverb wet")?;
        let master = create_gain(&ctx, MASTER_GAIN, "Master")?;
        let reverb = create_reverb(&ctx)?;
        let analyser =
            web::AnalyserNode::new(&ctx).map_err(|e| anyhow!("AnalyserNode error: {:?}", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);

        // osc -> envelope -> {dry, reverb -> wet} -> master -> {analyser, destination}
        connect(&osc, &envelope)?;
        connect(&envelope, &dry)?;
        connect(&envelope, &reverb)?;
        connect(&reverb, &wet)?;
        connect(&dry, &master)?;
        connect(&wet, &master)?;
        connect(&master, &analyser)?;
        connect(&master, &ctx.destination())?;

        osc.start().map_err(|e| anyhow!("oscillator start error: {:?}", e))?;
        let analyser_buf = vec![0.0; analyser.fft_size() as usize];
        log::info!(
            "[audio] graph ready sr={} fft={}",
            ctx.sample_rate(),
            analyser.fft_size()
        );

        Ok(Self {
            ctx,
            osc,
            envelope,
            analyser,
            analyser_buf,
            follower: AmplitudeFollower::new(AMPLITUDE_SMOOTHING),
        })
    }

    /// Browsers keep a new context suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    pub fn now(&self) -> f64 {
        self.ctx.current_time()
    }

    pub fn play(&self, note: &NoteTrigger) {
        let start = note.start_sec;
        _ = self
            .osc
            .frequency()
            .set_value_at_time(note.frequency_hz, start);
        let gain = self.envelope.gain();
        _ = gain.cancel_scheduled_values(start);
        let mut points = note.schedule.iter();
        if let Some(first) = points.next() {
            _ = gain.set_value_at_time(first.level, start + first.offset_sec);
        }
        for p in points {
            _ = gain.linear_ramp_to_value_at_time(p.level, start + p.offset_sec);
        }
    }

    /// Current output amplitude, sampled from the analyser.
    pub fn level(&mut self) -> f32 {
        self.analyser
            .get_float_time_domain_data(&mut self.analyser_buf);
        self.follower.update(&self.analyser_buf)
    }
}
