//! IdGenerator port - post id 生成の抽象化
//!
//! 本番の realtime store は自分で push key を割り当てるため、この port を
//! 使うのは InMemoryPostStore だけです。ULID を使うのは push key と同じく
//! 「時刻順にソート可能・調整なしで生成可能」という特性を持つため。

use ulid::Ulid;

use crate::domain::PostId;
use crate::ports::Clock;

/// IdGenerator は store 側で割り当てる post id を生成
pub trait IdGenerator: Send + Sync {
    fn next_post_id(&self) -> PostId;
}

/// UlidGenerator は ULID ベースの id 生成器
///
/// Clock を差し替えることでテスト時に timestamp 部分を固定できます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn next_post_id(&self) -> PostId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        PostId::new(ulid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let a = id_gen.next_post_id();
        let b = id_gen.next_post_id();
        let c = id_gen.next_post_id();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp_part() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let a = id_gen.next_post_id();
        let b = id_gen.next_post_id();

        // Random part still differs.
        assert_ne!(a, b);

        let ts_a = Ulid::from_string(a.as_str()).unwrap().timestamp_ms();
        let ts_b = Ulid::from_string(b.as_str()).unwrap().timestamp_ms();
        assert_eq!(ts_a, ts_b);
        assert_eq!(ts_a, fixed_time.timestamp_millis() as u64);
    }
}
