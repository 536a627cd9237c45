// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

const BAR_WIDTH: usize = 50;

/// `HH:MM:SS`, hours keep counting past a day.
pub fn elapsed_time(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Text gauge for a fraction in `[0, 1]`: `0%|||||     ...  42.0/100%`
pub fn progress_bar(fraction: f32) -> String {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let bars = fraction * BAR_WIDTH as f32;

    let mut result = String::from("0%");
    result.extend((0..BAR_WIDTH).map(|i| if (i as f32) < bars { '|' } else { ' ' }));
    result.push_str(&format!(" {:>5.1}/100%", fraction * 100.0));
    result
}
