use time::OffsetDateTime;

/// Source of the current Unix time in whole seconds.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
	fn now(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> u64 {
		// Pre-epoch clocks clamp to zero.
		u64::try_from(OffsetDateTime::now_utc().unix_timestamp()).unwrap_or(0)
	}
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
	fn now(&self) -> u64 {
		self.0
	}
}
