#[cfg(target_arch = "wasm32")]
type Mark = f64;
#[cfg(not(target_arch = "wasm32"))]
type Mark = std::time::Instant;

// `Instant` panics on wasm32, so the browser clock stands in there.
fn now() -> Mark {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::Instant::now()
    }
}

fn ms_since(mark: &Mark) -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() - mark).max(0.0)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        mark.elapsed().as_secs_f64() * 1000.0
    }
}

/// Where the time of one snap attempt went.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct AttemptTiming {
    /// Building the spatial snapshot of active points
    pub index_ms: f64,
    /// Whole attempt, index build included
    pub total_ms: f64,
}

/// Splits a snap attempt into the index build and the rest.
pub(crate) struct AttemptTimer {
    started: Mark,
    index_ms: Option<f64>,
}

impl AttemptTimer {
    pub(crate) fn start() -> Self {
        Self {
            started: now(),
            index_ms: None,
        }
    }

    pub(crate) fn index_built(&mut self) {
        self.index_ms = Some(ms_since(&self.started));
    }

    pub(crate) fn finish(self) -> AttemptTiming {
        let total_ms = ms_since(&self.started);
        AttemptTiming {
            index_ms: self.index_ms.unwrap_or(0.0).min(total_ms),
            total_ms,
        }
    }
}
