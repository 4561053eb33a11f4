use rand::Rng;
use smallvec::SmallVec;

/// Tonal mode of the instrument. Selects both the playable notes and the
/// background color mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

pub const MAJOR_NOTES: &[i32] = &[54, 57, 62, 64, 66, 69, 73, 76, 78, 81];
pub const MINOR_NOTES: &[i32] = &[57, 58, 61, 62, 64, 65, 69, 70, 74, 77];

impl Mode {
    /// Active note sequence (MIDI note numbers).
    pub fn notes(self) -> &'static [i32] {
        match self {
            Mode::Major => MAJOR_NOTES,
            Mode::Minor => MINOR_NOTES,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Major => Mode::Minor,
            Mode::Minor => Mode::Major,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }
}

#[inline]
pub fn mode_for_key(key: &str, current: Mode) -> Option<Mode> {
    match key {
        "m" | "M" => Some(current.toggled()),
        "1" => Some(Mode::Major),
        "2" => Some(Mode::Minor),
        _ => None,
    }
}

// Mouse release picks among the lowest notes only
pub const POINTER_NOTE_CANDIDATES: usize = 7;
// Touch historically addressed 11 slots; always bounded by the sequence length
pub const TOUCH_NOTE_CANDIDATES: usize = 11;

/// User gesture that may trigger a note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    PointerUp,
    TouchStart { touches: u32 },
}

/// Number of leading notes a gesture may choose from, or `None` when the
/// gesture must not play anything (multi-touch, empty sequence).
pub fn candidate_count(gesture: Gesture, available: usize) -> Option<usize> {
    let wanted = match gesture {
        Gesture::PointerUp => POINTER_NOTE_CANDIDATES,
        Gesture::TouchStart { touches: 1 } => TOUCH_NOTE_CANDIDATES,
        Gesture::TouchStart { .. } => return None,
    };
    let n = wanted.min(available);
    (n > 0).then_some(n)
}

pub fn pick_note<R: Rng + ?Sized>(notes: &[i32], gesture: Gesture, rng: &mut R) -> Option<i32> {
    let n = candidate_count(gesture, notes.len())?;
    notes.get(rng.gen_range(0..n)).copied()
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

// ---------------- Envelope ----------------

/// How long a triggered note stays at the sustain level before its release.
pub const NOTE_HOLD_SEC: f64 = 0.1;

/// A point on the envelope curve, relative to the trigger time.
/// Consecutive points are joined by linear ramps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    pub offset_sec: f64,
    pub level: f32,
}

pub type Schedule = SmallVec<[Breakpoint; 5]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adsr {
    pub attack_sec: f64,
    pub decay_sec: f64,
    /// Sustain level as a fraction of the attack/release level range.
    pub sustain_ratio: f32,
    pub release_sec: f64,
    pub attack_level: f32,
    pub release_level: f32,
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack_sec: 0.15,
            decay_sec: 0.5,
            sustain_ratio: 0.1,
            release_sec: 0.5,
            attack_level: 0.75,
            release_level: 0.0,
        }
    }
}

impl Adsr {
    pub fn sustain_level(&self) -> f32 {
        self.sustain_ratio * (self.attack_level - self.release_level) + self.release_level
    }

    /// Breakpoints for a note that sustains for `sustain_sec`, starting
    /// from `start_level`.
    ///
    /// Attack and decay always run to completion; the release begins
    /// `attack + decay + sustain_sec` after the trigger.
    pub fn schedule(&self, start_level: f32, sustain_sec: f64) -> Schedule {
        let attack = self.attack_sec.max(0.0);
        let decay_end = attack + self.decay_sec.max(0.0);
        let release_start = self.release_start(sustain_sec);
        let sustain = self.sustain_level();

        let mut points = Schedule::new();
        points.push(Breakpoint {
            offset_sec: 0.0,
            level: start_level,
        });
        points.push(Breakpoint {
            offset_sec: attack,
            level: self.attack_level,
        });
        points.push(Breakpoint {
            offset_sec: decay_end,
            level: sustain,
        });
        if release_start > decay_end {
            points.push(Breakpoint {
                offset_sec: release_start,
                level: sustain,
            });
        }
        points.push(Breakpoint {
            offset_sec: release_start + self.release_sec.max(0.0),
            level: self.release_level,
        });
        points
    }

    /// Offset from the trigger at which the release ramp starts.
    pub fn release_start(&self, sustain_sec: f64) -> f64 {
        self.attack_sec.max(0.0) + self.decay_sec.max(0.0) + sustain_sec.max(0.0)
    }
}

/// Level of a schedule at `offset_sec` after its trigger. Holds the first
/// level before the start and the last level after the end.
pub fn level_at(points: &[Breakpoint], offset_sec: f64) -> f32 {
    let first = match points.first() {
        Some(p) => p,
        None => return 0.0,
    };
    if offset_sec <= first.offset_sec {
        return first.level;
    }
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if offset_sec <= b.offset_sec {
            let span = b.offset_sec - a.offset_sec;
            if span <= 0.0 {
                return b.level;
            }
            let t = ((offset_sec - a.offset_sec) / span) as f32;
            return a.level + (b.level - a.level) * t;
        }
    }
    points.last().map(|p| p.level).unwrap_or(0.0)
}

/// Everything the audio backend needs to sound one note.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteTrigger {
    pub midi: i32,
    pub frequency_hz: f32,
    pub start_sec: f64,
    pub schedule: Schedule,
}

/// Monophonic voice: one oscillator frequency, one envelope.
///
/// A new trigger overwrites the pending frequency and restarts the envelope
/// from its current level; nothing is queued.
#[derive(Clone, Debug, Default)]
pub struct Voice {
    adsr: Adsr,
    pending_hz: Option<f32>,
    last: Option<(f64, Schedule)>,
}

impl Voice {
    pub fn new(adsr: Adsr) -> Self {
        Self {
            adsr,
            pending_hz: None,
            last: None,
        }
    }

    pub fn pending_frequency(&self) -> Option<f32> {
        self.pending_hz
    }

    pub fn level_at(&self, now_sec: f64) -> f32 {
        match &self.last {
            Some((start, schedule)) => level_at(schedule, now_sec - start),
            None => self.adsr.release_level,
        }
    }

    pub fn trigger(&mut self, midi: i32, now_sec: f64, sustain_sec: f64) -> NoteTrigger {
        let frequency_hz = midi_to_hz(midi as f32);
        let start_level = self.level_at(now_sec);
        let schedule = self.adsr.schedule(start_level, sustain_sec);
        self.pending_hz = Some(frequency_hz);
        self.last = Some((now_sec, schedule.clone()));
        NoteTrigger {
            midi,
            frequency_hz,
            start_sec: now_sec,
            schedule,
        }
    }
}

// ---------------- Reverb impulse ----------------

/// Decaying noise impulse for a convolution reverb: `noise * (1 - i/len)^decay`.
///
/// Noise comes from a xorshift32 generator so the impulse is reproducible.
pub fn reverb_impulse(len: usize, decay: f32, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let noise = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
        let remaining = 1.0 - i as f32 / len as f32;
        out.push(noise * remaining.powf(decay));
    }
    out
}
