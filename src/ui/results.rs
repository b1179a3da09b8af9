use crate::app::ResultSummary;
use crate::session::MissedQuestion;
use crate::ui::key_span;
use crate::ui::layout::calculate_results_chunks;
use crate::utils::{format_elapsed, truncate_string};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const PROMPT_WIDTH: usize = 150;
const EXPLANATION_WIDTH: usize = 200;

fn missed_entry_lines(position: usize, missed: &MissedQuestion) -> Vec<String> {
    let question = &missed.question;
    let given = missed
        .given
        .map(|letter| letter.to_string())
        .unwrap_or_else(|| "No answer".to_string());
    vec![
        format!("{}. Question {}:", position, question.number),
        format!("   {}", truncate_string(&question.prompt, PROMPT_WIDTH)),
        format!("   Your Answer: {}", given),
        format!("   Correct Answer: {}", question.correct_answer),
        format!(
            "   Explanation: {}",
            truncate_string(&question.feedback, EXPLANATION_WIDTH)
        ),
    ]
}

pub fn draw_results(f: &mut Frame, summary: &ResultSummary) {
    let layout = calculate_results_chunks(f.area());
    let result = &summary.result;

    let header = Paragraph::new(result.mode.results_heading())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let grade_color = if result.grade.is_passing() {
        Color::Green
    } else {
        Color::Red
    };
    let score_text = vec![
        Line::from(format!(
            "Score: {}/{} ({:.1}%)",
            result.correct, result.total, result.percentage
        )),
        Line::from(Span::styled(
            format!("Grade: {} - {}", result.grade.letter(), result.grade.status()),
            Style::default()
                .fg(grade_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Time: {}", format_elapsed(result.elapsed))),
    ];
    let score = Paragraph::new(score_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, layout.score_area);

    let mut details = Text::default();
    if result.missed.is_empty() {
        details.push_line(Line::from(Span::styled(
            "PERFECT SCORE! You answered all questions correctly!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        details.push_line(Line::from(Span::styled(
            format!("QUESTIONS TO REVIEW ({}):", result.missed.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        details.push_line(Line::from(""));
        for (i, missed) in result.missed.iter().enumerate() {
            for line in missed_entry_lines(i + 1, missed) {
                details.push_line(Line::from(line));
            }
            details.push_line(Line::from(""));
        }
    }
    let details = Paragraph::new(details)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Detailed Results"));
    f.render_widget(details, layout.details_area);

    let mut help_spans = vec![key_span("r"), Span::from(" Retake  ")];
    if summary.offers_review() {
        let count = result.review_set.len();
        help_spans.extend([
            key_span("w"),
            Span::from(format!(" Mini Test ({})  ", count)),
            key_span("f"),
            Span::from(format!(" Mini Flash Cards ({})  ", count)),
        ]);
    }
    help_spans.extend([
        key_span("m"),
        Span::from(" Main Menu  "),
        key_span("q"),
        Span::from(" Quit"),
    ]);
    let help = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionLetter, QuestionBank};

    #[test]
    fn test_missed_entry_without_answer() {
        let mut question = QuestionBank::bundled().questions()[0].clone();
        question.prompt = "p".repeat(160);
        question.feedback = "f".repeat(50);
        let missed = MissedQuestion {
            question,
            given: None,
        };

        let lines = missed_entry_lines(2, &missed);
        assert_eq!(lines[0], "2. Question 1:");
        assert_eq!(lines[1], format!("   {}...", "p".repeat(150)));
        assert_eq!(lines[2], "   Your Answer: No answer");
        assert_eq!(lines[3], "   Correct Answer: B");
        assert_eq!(lines[4], format!("   Explanation: {}", "f".repeat(50)));
    }

    #[test]
    fn test_missed_entry_with_answer() {
        let missed = MissedQuestion {
            question: QuestionBank::bundled().questions()[1].clone(),
            given: Some(OptionLetter::D),
        };
        assert_eq!(missed_entry_lines(1, &missed)[2], "   Your Answer: D");
    }
}
