// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use crate::{Error, Result};
use chrono::{TimeDelta, TimeZone, Utc};
use std::fmt;
use std::time::Duration;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Create datetime from unix timestamp in seconds.
pub fn from_timestamp(secs: i64) -> Result<DateTime> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| Error::unexpected(format!("timestamp {secs} is out of range")))
}

/// A closed time range, formatted as `{start};{end}` in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Start of the window.
    pub start: DateTime,
    /// End of the window.
    pub end: DateTime,
}

impl TimeWindow {
    /// Create a window starting at `start` and lasting `expires`.
    pub fn new(start: DateTime, expires: Duration) -> Self {
        let delta = TimeDelta::from_std(expires).unwrap_or(TimeDelta::MAX);
        Self {
            start,
            end: start.checked_add_signed(delta).unwrap_or(start),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.start.timestamp(), self.end.timestamp())
    }
}

/// AuthTime carries the two windows used by window based signatures.
///
/// - `sign`: the validity of the request signature (`q-sign-time`).
/// - `key`: the validity of the derived signing key (`q-key-time`).
///
/// Both windows share the same range when created by [`AuthTime::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTime {
    /// Window of the signature.
    pub sign: TimeWindow,
    /// Window of the signing key.
    pub key: TimeWindow,
}

impl AuthTime {
    /// Create an auth time valid from now on for `expires`.
    pub fn new(expires: Duration) -> Self {
        Self::starting_at(now(), expires)
    }

    /// Create an auth time valid from `start` on for `expires`.
    pub fn starting_at(start: DateTime, expires: Duration) -> Self {
        let window = TimeWindow::new(start, expires);
        Self {
            sign: window,
            key: window,
        }
    }

    /// Create an auth time with independent sign and key windows.
    pub fn from_windows(sign: TimeWindow, key: TimeWindow) -> Self {
        Self { sign, key }
    }
}
