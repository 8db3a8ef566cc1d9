use lucky_core::{ReelDisplay, SLOT_COUNT};
use lucky_shared::{slot_face, ResultModal};

pub const RULE: &str = "========================================";

pub fn reels_line(reels: &[ReelDisplay; SLOT_COUNT]) -> String {
    reels
        .iter()
        .map(|r| {
            let face = slot_face(r.digit);
            if r.rolling {
                format!("( {face} )")
            } else {
                format!("[ {face} ]")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn modal(modal: &ResultModal) -> String {
    format!(
        "{RULE}\nNumbers: {}\nTotal:   {}\nPattern: {}\n{}\n{RULE}",
        modal.numbers_line(),
        modal.total,
        modal.pattern_label,
        modal.message
    )
}

pub const HELP: &str = "\
Commands:
  <enter> / roll   roll the next number (or show the result)
  1-6              pick a number yourself
  hint             suggest a number
  reset            start over
  help             show this help
  quit             leave the game";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_slots_use_round_brackets() {
        let idle = ReelDisplay {
            digit: None,
            rolling: false,
            completed: false,
            final_digit: None,
        };
        let rolling = ReelDisplay {
            digit: Some(3),
            rolling: true,
            ..idle
        };
        let locked = ReelDisplay {
            digit: Some(5),
            completed: true,
            final_digit: Some(5),
            ..idle
        };
        assert_eq!(reels_line(&[locked, rolling, idle]), "[ 5 ] ( 3 ) [ ? ]");
    }

    #[test]
    fn modal_lists_numbers_and_message() {
        let result = lucky_core::classify([1, 2, 3]).unwrap();
        let text = modal(&ResultModal::from(&result));
        assert!(text.contains("Numbers: 1 - 2 - 3"));
        assert!(text.contains("Total:   6"));
        assert!(text.contains("Consecutive numbers! Great choice! Total: 6"));
    }
}
