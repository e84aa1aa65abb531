// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

fn millis(now: DateTime<Utc>) -> u64 {
    u64::try_from(now.timestamp_millis()).unwrap_or(0)
}

/// Monotonic (millis, sequence) pairs: the sequence resets whenever the clock moves forward.
#[derive(Debug, Default)]
struct Tick {
    last_ms: u64,
    seq: u64,
}

impl Tick {
    fn advance(&mut self, now_ms: u64) -> (u64, u64) {
        if now_ms > self.last_ms {
            self.last_ms = now_ms;
            self.seq = 0;
        } else {
            self.seq += 1;
        }
        (self.last_ms, self.seq)
    }
}

/// Client-side transaction ids: base36 millis followed by a base36 sequence.
#[derive(Debug, Default)]
pub struct IdGenerator {
    tick: Tick,
}

impl IdGenerator {
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let (ms, seq) = self.tick.advance(millis(now));
        format!("{}{:0>4}", to_base36(ms), to_base36(seq))
    }
}

/// Store record keys. Fixed-width hex, so lexical order equals creation order.
/// The suffix keeps keys from separate writers apart when they share a millisecond.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    tick: Tick,
    suffix: String,
}

impl KeyGenerator {
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            tick: Tick::default(),
            suffix: suffix.into(),
        }
    }

    pub fn next_key(&mut self, now: DateTime<Utc>) -> String {
        let (ms, seq) = self.tick.advance(millis(now));
        format!("{:012x}{:06x}{}", ms, seq, self.suffix)
    }
}
