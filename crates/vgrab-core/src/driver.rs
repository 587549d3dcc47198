//! Page driver seam: the capability contract the harvest pipeline needs from a
//! browser, plus the bounded scroll-to-stable loop.
//!
//! The core only depends on this trait and does not know about chromiumoxide
//! or any other concrete browser; tests drive the loop with a fake.

use anyhow::Result;
use std::time::Duration;

/// Capabilities required from a controlled browser page.
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// Navigate to `url`. Failure to load within the driver's timeout surfaces
    /// as an error and is not retried.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Trigger one scroll-to-end action.
    async fn scroll_step(&mut self) -> Result<()>;

    /// Current measurable page height signal.
    async fn page_height(&mut self) -> Result<u64>;

    /// Current serialized page markup.
    async fn content(&mut self) -> Result<String>;

    /// Network response URLs observed so far, in observation order.
    fn observed_urls(&self) -> Vec<String>;
}

/// Repeatedly scrolls to the bottom until the page height stops changing or
/// `max_rounds` is reached, whichever comes first. Each round scrolls, waits
/// `wait` for lazy content, then measures. Returns the number of rounds
/// performed.
///
/// This bounds an otherwise-unbounded loop against pages with infinite or
/// stalled content; `max_rounds` and `wait` are the only backpressure knobs.
pub async fn scroll_until_stable<D: PageDriver>(
    driver: &mut D,
    max_rounds: u32,
    wait: Duration,
) -> Result<u32> {
    let mut prev_height: Option<u64> = None;
    let mut rounds = 0;

    for _ in 0..max_rounds {
        driver.scroll_step().await?;
        tokio::time::sleep(wait).await;
        let height = driver.page_height().await?;
        rounds += 1;
        if prev_height == Some(height) {
            break;
        }
        prev_height = Some(height);
    }

    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fake driver replaying a fixed sequence of page heights.
    struct FakePage {
        heights: Vec<u64>,
        measured: usize,
        scrolls: u32,
    }

    impl FakePage {
        fn with_heights(heights: &[u64]) -> Self {
            Self {
                heights: heights.to_vec(),
                measured: 0,
                scrolls: 0,
            }
        }
    }

    impl PageDriver for FakePage {
        async fn navigate(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn scroll_step(&mut self) -> Result<()> {
            self.scrolls += 1;
            Ok(())
        }

        async fn page_height(&mut self) -> Result<u64> {
            let h = self
                .heights
                .get(self.measured)
                .copied()
                .unwrap_or_else(|| *self.heights.last().unwrap_or(&0));
            self.measured += 1;
            Ok(h)
        }

        async fn content(&mut self) -> Result<String> {
            Ok(String::new())
        }

        fn observed_urls(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn stops_when_two_consecutive_measurements_are_equal() {
        let mut page = FakePage::with_heights(&[100, 200, 200, 300]);
        let rounds = scroll_until_stable(&mut page, 12, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(rounds, 3);
        assert_eq!(page.scrolls, 3);
    }

    #[tokio::test]
    async fn never_stable_stops_after_exactly_max_rounds() {
        let mut page = FakePage::with_heights(&[100, 200, 300, 400, 500, 600]);
        let rounds = scroll_until_stable(&mut page, 3, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(rounds, 3);
        assert_eq!(page.scrolls, 3);
    }

    #[tokio::test]
    async fn zero_rounds_means_no_scrolling() {
        let mut page = FakePage::with_heights(&[100]);
        let rounds = scroll_until_stable(&mut page, 0, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(rounds, 0);
        assert_eq!(page.scrolls, 0);
    }

    #[tokio::test]
    async fn immediately_stable_page_scrolls_twice() {
        // First round records the height, second confirms it is unchanged.
        let mut page = FakePage::with_heights(&[500, 500]);
        let rounds = scroll_until_stable(&mut page, 12, Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(rounds, 2);
    }
}
