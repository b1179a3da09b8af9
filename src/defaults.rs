use crate::models::{CorrectAnswer, OptionLetter, Question};

fn question(
    number: u32,
    prompt: &str,
    options: [&str; 4],
    correct: OptionLetter,
    feedback: &str,
) -> Question {
    Question {
        number,
        prompt: prompt.to_string(),
        options: OptionLetter::ALL.into_iter().zip(options).collect(),
        correct_answer: CorrectAnswer::Letter(correct),
        feedback: feedback.to_string(),
    }
}

/// Sample questions shipped with the binary, used until a document is uploaded.
pub fn default_questions() -> Vec<Question> {
    vec![
        question(
            1,
            "Which of the following statements is correct in relation to deed and zoning restrictions?",
            [
                "Zoning regulations are imposed by the Federal government",
                "Deed restrictions are imposed by individuals",
                "If there's a conflict between a deed restriction and zoning regulation, the deed restrictions will apply",
                "None of the above",
            ],
            OptionLetter::B,
            "Both restrictive covenants and zoning impose restrictions on private property uses. However, zoning is established/enforced by local governments and is based on law and restrictive covenants arise from contractual agreements.",
        ),
        question(
            2,
            "Which of the following amounts is prorated between buyer and seller at closing?",
            [
                "HOA fees",
                "Title Insurance payment",
                "Recording fees",
                "Commission",
            ],
            OptionLetter::A,
            "Recording fees (seller), commission (both parties pay separately) and title insurance (buyers) are NOT prorated. HOA fees, utilities and property taxes are typically prorated.",
        ),
        question(
            3,
            "Under the Equal Credit Opportunity Act (ECOA), which of the following would constitute prohibited discrimination?",
            [
                "Denying a mortgage because the applicant receives public assistance",
                "Refusing to lend to applicants who don't meet income requirements",
                "Denying credit to an applicant due to poor credit history",
                "Requiring additional documentation for applicants employed in their current position less than 2 years",
            ],
            OptionLetter::A,
            "The ECOA prohibits discrimination based on protected characteristics, including the receipt of public assistance.",
        ),
        question(
            4,
            "Stan is a broker who represents both the buyer and seller in a real estate transaction. To avoid conflicts, Stan appoints Agent A to represent the seller and Agent B to represent the buyer. Both agents work under Stan's brokerage. What type of agency relationship is this?",
            [
                "Dual agency",
                "Transactional agency",
                "Exclusive buyer agency",
                "Designated agency",
            ],
            OptionLetter::D,
            "In a designated agency, the broker represents both parties in the transaction but appoints separate agents to represent each client.",
        ),
        question(
            5,
            "Which of the following firm names is in compliance with board regulations?",
            [
                "Zen Realty",
                "Salesperson Sally Homes",
                "Broker Bill Realty",
                "Either A or C",
            ],
            OptionLetter::D,
            "All firms may operate under fictitious names. However, non-broker owned firms can only be licensed in the company's legal name. The name of a salesperson cannot appear in the firm name.",
        ),
    ]
}
