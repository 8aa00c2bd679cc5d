//! Built-in categories and questions so the app is playable without any config.

use crate::domain::{Category, NewQuestion};

pub fn seed_categories() -> Vec<Category> {
  [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
  ]
  .into_iter()
  .map(|(id, kind)| Category { id, kind: kind.into() })
  .collect()
}

fn q(question: &str, answer: &str, difficulty: i32, category: i64) -> NewQuestion {
  NewQuestion { question: question.into(), answer: answer.into(), difficulty, category }
}

pub fn seed_questions() -> Vec<NewQuestion> {
  vec![
    q("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 4, 5),
    q("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 4, 5),
    q("What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 3, 5),
    q("What boxer's original name is Cassius Clay?", "Muhammad Ali", 1, 4),
    q("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 3, 6),
    q("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 4, 6),
    q("Who invented Peanut Butter?", "George Washington Carver", 2, 4),
    q("What is the largest lake in Africa?", "Lake Victoria", 2, 3),
    q("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    q("The Taj Mahal is located in which Indian city?", "Agra", 2, 3),
    q("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 1, 2),
    q("La Giaconda is better known as what?", "Mona Lisa", 3, 2),
    q("How many paintings did Van Gogh sell in his lifetime?", "One", 4, 2),
    q("Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    q("What is the heaviest organ in the human body?", "The Liver", 4, 1),
    q("Who discovered penicillin?", "Alexander Fleming", 3, 1),
    q("Hematology is a branch of medicine involving the study of what?", "Blood", 4, 1),
    q("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
    q("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 2, 4),
  ]
}
