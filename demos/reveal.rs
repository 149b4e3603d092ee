//! Reveal walkthrough - run with: cargo run --example reveal

use std::time::Duration;

use termfolio::content::{layout, visible_fraction, Page};
use termfolio::reveal::{RevealPhase, RevealTracker, REVEAL_DURATION};

const VIEWPORT: usize = 12;

fn main() {
    let page = Page::builtin();
    let extents = layout(&page);
    let animates: Vec<bool> = page.blocks.iter().map(|b| b.kind.animates()).collect();
    let mut tracker = RevealTracker::new(&animates);

    println!("Scrolling a {}-line viewport over {} lines of page", VIEWPORT, page.total_height());
    println!();

    let max_scroll = page.total_height().saturating_sub(VIEWPORT);

    for scroll in 0..=max_scroll {
        let mut newly_armed = Vec::new();

        for (i, extent) in extents.iter().enumerate() {
            let was_hidden = tracker.phase(i) == RevealPhase::Hidden;
            tracker.observe(i, visible_fraction(*extent, scroll, VIEWPORT));
            if was_hidden && tracker.phase(i) != RevealPhase::Hidden {
                newly_armed.push(i);
            }
        }

        for i in newly_armed {
            let label = page.blocks[i]
                .lines
                .first()
                .map(String::as_str)
                .unwrap_or("(form)");
            println!("scroll {:>2}: block {:>2} starts revealing - {}", scroll, i, label);
        }

        // Advance the fade a little between scroll steps
        tracker.tick(Duration::from_millis(50));
    }

    // Let every running animation finish
    tracker.tick(REVEAL_DURATION);

    let shown = (0..tracker.len())
        .filter(|&i| tracker.phase(i) == RevealPhase::Shown)
        .count();
    println!();
    println!("{}/{} blocks shown", shown, tracker.len());
}
