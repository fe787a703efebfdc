use instant::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_results: Vec<String>,
}

/// Hierarchial magic. Brackets phases of work with `start` and `stop`, and collects notes and
/// warnings. Everything is printed through the `log` crate, and a summary of all spans, notes,
/// and warnings is repeated when the Timer is dropped, to avoid having to scroll up and find
/// interesting debug stuff.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<TimerSpan>,

    outermost_name: String,

    notes: Vec<String>,
    warnings: Vec<String>,
}

impl Timer {
    pub fn new<S: Into<String>>(raw_name: S) -> Timer {
        let name = raw_name.into();
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.clone(),
            notes: Vec::new(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    // TODO Shouldn't use this much.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    /// Log immediately, but also repeat at the end.
    pub fn note<S: Into<String>>(&mut self, raw_line: S) {
        let line = raw_line.into();
        info!("{}", line);
        self.notes.push(line);
    }

    /// Only printed at the end.
    pub fn warn<S: Into<String>>(&mut self, line: S) {
        self.warnings.push(line.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Used to end the scope of a timer early.
    pub fn done(self) {}

    pub fn start<S: Into<String>>(&mut self, raw_name: S) {
        let name = raw_name.into();
        debug!("{}...", name);
        self.stack.push(TimerSpan {
            name,
            started_at: Instant::now(),
            nested_results: Vec::new(),
        });
    }

    pub fn stop<S: Into<String>>(&mut self, raw_name: S) {
        let name = raw_name.into();
        let span = match self.stack.pop() {
            Some(span) => span,
            None => {
                error!("Timer stopped {} with nothing started", name);
                return;
            }
        };
        if span.name != name {
            error!("Timer stopped {}, but {} is the current span", name, span.name);
        }
        let line = format!(
            "{} took {}",
            span.name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );
        debug!("{}", line);

        let padding = "  ".repeat(self.stack.len());
        let nested = span.nested_results;
        match self.stack.last_mut() {
            Some(parent) => {
                parent.nested_results.push(format!("{}- {}", padding, line));
                parent.nested_results.extend(nested);
            }
            None => {
                self.results.push(format!("{}- {}", padding, line));
                self.results.extend(nested);
            }
        }
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }

        // Close anything left open, innermost first
        while self.stack.len() > 1 {
            let name = match self.stack.last() {
                Some(span) => span.name.clone(),
                None => break,
            };
            warn!("Timer span {} was never stopped", name);
            self.stop(name);
        }
        if !self.stack.is_empty() {
            let name = self.outermost_name.clone();
            self.stop(name);
        }

        for line in &self.results {
            debug!("{}", line);
        }

        if !self.notes.is_empty() {
            info!("{} notes:", self.notes.len());
            for line in &self.notes {
                info!("{}", line);
            }
        }

        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_spans_and_warnings() {
        let mut timer = Timer::new("outer");
        timer.start("inner");
        timer.warn("something looks off");
        timer.stop("inner");
        timer.note(format!("found {} things", 3));

        assert_eq!(timer.warnings(), &["something looks off".to_string()]);
        assert_eq!(timer.notes(), &["found 3 things".to_string()]);
        assert_eq!(timer.stack.len(), 1);
        timer.done();
    }

    #[test]
    fn unbalanced_stop_doesnt_panic() {
        let mut timer = Timer::throwaway();
        timer.start("a");
        timer.stop("b");
        timer.stop("throwaway");
        timer.stop("nothing left");
        assert!(timer.stack.is_empty());
    }
}
