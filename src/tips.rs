use rand::seq::SliceRandom;
use rand::Rng;

pub const TIPS: [&str; 5] = [
    "Take a short walk outside today to clear your mind.",
    "Try deep breathing exercises for 5 minutes.",
    "Remember to drink water and stay hydrated!",
    "Write down 3 things you're grateful for.",
    "Reach out to a friend or family member for support.",
];

/// Shuffles `all_tips` and keeps the first `count`.
pub fn pick_daily_tips<R: Rng + ?Sized>(all_tips: &[&str], count: usize, rng: &mut R) -> Vec<String> {
    let mut tips: Vec<String> = all_tips.iter().map(|t| t.to_string()).collect();
    tips.shuffle(rng);
    tips.truncate(count);
    tips
}
