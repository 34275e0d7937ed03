use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::country::Country;
use crate::services::countries_client::CountriesClient;
use crate::utils::error::ApiError;
use crate::utils::html::escape;
use crate::utils::random::{distinct_random_values_excluding, random_int_inclusive, shuffle_tracking, SampleError, ONE_SEC};

pub const NUM_ANSWERS: usize = 4;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("answer sampling failed: {0}")]
    Sample(#[from] SampleError),
    #[error("no country has both a capital and a language")]
    NoPlayableCountries,
    #[error("answer {0} is not on the board")]
    InvalidAnswer(usize),
    #[error("no question has been asked yet")]
    NoQuestion,
    #[error(transparent)]
    External(#[from] ApiError),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Flag,
    Capital,
    Language,
}

impl QuestionType {
    pub fn next(self) -> Self {
        match self {
            QuestionType::Flag => QuestionType::Capital,
            QuestionType::Capital => QuestionType::Language,
            QuestionType::Language => QuestionType::Flag,
        }
    }
}

/// Where the game stands: which country the round is about, which question
/// is on the board and where its correct answer sits.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub chosen_country: Option<usize>,
    pub question: Option<QuestionType>,
    pub correct_answer: Option<usize>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerColor {
    Neutral,
    Correct,
    Wrong,
}

impl AnswerColor {
    pub fn css(self) -> &'static str {
        match self {
            AnswerColor::Neutral => "rgb(197, 197, 197)",
            AnswerColor::Correct => "green",
            AnswerColor::Wrong => "red",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnswerView {
    pub html: String,
    pub aria_label: Option<String>,
    pub background: AnswerColor,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub kind: QuestionType,
    pub prompt: String,
    pub answers: Vec<AnswerView>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The next question comes up after the given delay.
    Correct { advance_after: Duration },
    Wrong,
}

pub struct QuizGame {
    countries: Vec<Country>,
    session: QuizSession,
    view: Option<QuestionView>,
}

impl QuizGame {
    pub fn new(countries: Vec<Country>) -> Result<Self, QuizError> {
        if !countries.iter().any(Country::is_playable) {
            return Err(QuizError::NoPlayableCountries);
        }
        Ok(Self { countries, session: QuizSession::default(), view: None })
    }

    /// Loads the countries once and puts the first question on the board.
    pub async fn load<R: Rng + ?Sized>(client: &CountriesClient, rng: &mut R) -> Result<Self, QuizError> {
        let countries = client.get_countries_info().await?;
        let mut game = Self::new(countries)?;
        game.next_question_or_new_game(rng)?;
        Ok(game)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn view(&self) -> Option<&QuestionView> {
        self.view.as_ref()
    }

    pub fn next_question_or_new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&QuestionView, QuizError> {
        advance(&self.countries, &mut self.session, rng)?;
        let view = next_question(&self.countries, &mut self.session, rng)?;
        Ok(&*self.view.insert(view))
    }

    pub fn check_result(&mut self, selected: usize) -> Result<AnswerOutcome, QuizError> {
        let correct = self.session.correct_answer.ok_or(QuizError::NoQuestion)?;
        let view = self.view.as_mut().ok_or(QuizError::NoQuestion)?;
        let answer = view.answers.get_mut(selected).ok_or(QuizError::InvalidAnswer(selected))?;

        if selected == correct {
            answer.background = AnswerColor::Correct;
            Ok(AnswerOutcome::Correct { advance_after: ONE_SEC })
        } else {
            answer.background = AnswerColor::Wrong;
            Ok(AnswerOutcome::Wrong)
        }
    }

    /// Handles a click on answer `selected`; a right answer moves on after a pause.
    pub async fn click<R: Rng + ?Sized>(&mut self, selected: usize, rng: &mut R) -> Result<AnswerOutcome, QuizError> {
        let outcome = self.check_result(selected)?;
        if let AnswerOutcome::Correct { advance_after } = outcome {
            tokio::time::sleep(advance_after).await;
            self.next_question_or_new_game(rng)?;
        }
        Ok(outcome)
    }
}

/// Moves the session to the next question type, or to a fresh country once
/// the language question has been played.
fn advance<R: Rng + ?Sized>(countries: &[Country], session: &mut QuizSession, rng: &mut R) -> Result<(), QuizError> {
    match (session.chosen_country, session.question) {
        (Some(_), Some(q)) if q != QuestionType::Language => {
            session.question = Some(q.next());
        }
        _ => {
            let playable: Vec<usize> = countries
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_playable())
                .map(|(i, _)| i)
                .collect();
            if playable.is_empty() {
                return Err(QuizError::NoPlayableCountries);
            }
            let chosen = playable[random_int_inclusive(rng, 0, playable.len() - 1)];
            info!("Chosen country: {} (index: {})", countries[chosen].name, chosen);

            session.chosen_country = Some(chosen);
            session.question = Some(QuestionType::Flag);
        }
    }
    Ok(())
}

/// Puts `correct` among `wrong`, shuffles, and returns the answers with the
/// correct one's new position.
fn arrange<T, R>(correct: T, wrong: Vec<T>, rng: &mut R) -> (Vec<T>, usize)
where
    T: std::fmt::Debug,
    R: Rng + ?Sized,
{
    let mut possible = Vec::with_capacity(NUM_ANSWERS);
    possible.push(correct);
    possible.extend(wrong);
    debug!("Possible answers: {:?}", possible);

    let position = shuffle_tracking(rng, &mut possible, 0);
    debug!("Shuffled answers: {:?} (correct at {})", possible, position);

    (possible, position)
}

pub fn next_question<R: Rng + ?Sized>(
    countries: &[Country],
    session: &mut QuizSession,
    rng: &mut R,
) -> Result<QuestionView, QuizError> {
    let chosen = session.chosen_country.ok_or(QuizError::NoQuestion)?;
    let question = session.question.ok_or(QuizError::NoQuestion)?;
    let country = countries.get(chosen).ok_or(QuizError::NoQuestion)?;

    match question {
        QuestionType::Flag => {
            debug!("Question about its FLAG");
            let pool: Vec<usize> = (0..countries.len()).collect();
            let wrong = distinct_random_values_excluding(rng, &pool, NUM_ANSWERS - 1, &[chosen])?;
            let (indexes, correct) = arrange(chosen, wrong, rng);
            session.correct_answer = Some(correct);

            let emojis: Vec<&str> = indexes.iter().map(|&i| countries[i].emoji.as_str()).collect();
            Ok(render_flag_question(&country.name, &emojis))
        }
        QuestionType::Capital => {
            debug!("Question about its CAPITAL");
            // One candidate per distinct capital, none sharing the right one.
            let right = country.capital.as_deref();
            let mut seen: Vec<&str> = Vec::new();
            let mut pool: Vec<usize> = Vec::new();
            for (i, c) in countries.iter().enumerate() {
                let Some(capital) = c.capital.as_deref() else {
                    continue;
                };
                if Some(capital) != right && !seen.contains(&capital) {
                    seen.push(capital);
                    pool.push(i);
                }
            }
            let wrong = distinct_random_values_excluding(rng, &pool, NUM_ANSWERS - 1, &[chosen])?;
            let (indexes, correct) = arrange(chosen, wrong, rng);
            session.correct_answer = Some(correct);

            let capitals: Vec<&str> = indexes
                .iter()
                .map(|&i| countries[i].capital.as_deref().unwrap_or_default())
                .collect();
            Ok(render_capital_question(&country.name, &capitals))
        }
        QuestionType::Language => {
            debug!("Question about its LANGUAGE");
            // Languages are shared between countries, so wrong answers come
            // from the full list minus every official language of the country.
            let mut all_languages: Vec<&str> = Vec::new();
            for name in countries.iter().flat_map(|c| c.languages.iter().map(|l| l.name.as_str())) {
                if !all_languages.contains(&name) {
                    all_languages.push(name);
                }
            }

            let official: Vec<&str> = country.languages.iter().map(|l| l.name.as_str()).collect();
            debug!("Official languages of the chosen country: {:?}", official);
            if official.is_empty() {
                return Err(QuizError::NoPlayableCountries);
            }

            let right = official[random_int_inclusive(rng, 0, official.len() - 1)];
            let wrong = distinct_random_values_excluding(rng, &all_languages, NUM_ANSWERS - 1, &official)?;
            let (languages, correct) = arrange(right, wrong, rng);
            session.correct_answer = Some(correct);

            Ok(render_language_question(&country.name, &languages))
        }
    }
}

fn country_prompt(template: (&str, &str), country: &str) -> String {
    format!("{}<span class=\"country\">{}</span>{}", template.0, escape(country), template.1)
}

pub fn render_flag_question(country: &str, emojis: &[&str]) -> QuestionView {
    QuestionView {
        kind: QuestionType::Flag,
        prompt: country_prompt(("What is the flag of ", "?"), country),
        answers: emojis
            .iter()
            .map(|emoji| AnswerView {
                html: format!("<span class=\"flag\">{}</span>", escape(emoji)),
                aria_label: None,
                background: AnswerColor::Neutral,
            })
            .collect(),
    }
}

fn text_answers(values: &[&str]) -> Vec<AnswerView> {
    values
        .iter()
        .map(|v| AnswerView {
            html: escape(v),
            aria_label: Some((*v).to_string()),
            background: AnswerColor::Neutral,
        })
        .collect()
}

pub fn render_capital_question(country: &str, capitals: &[&str]) -> QuestionView {
    QuestionView {
        kind: QuestionType::Capital,
        prompt: country_prompt(("What is the capital of ", "?"), country),
        answers: text_answers(capitals),
    }
}

pub fn render_language_question(country: &str, languages: &[&str]) -> QuestionView {
    QuestionView {
        kind: QuestionType::Language,
        prompt: country_prompt(("Which of these languages is official in ", "?"), country),
        answers: text_answers(languages),
    }
}
