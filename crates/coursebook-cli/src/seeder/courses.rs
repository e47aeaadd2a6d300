use coursebook_models::{NewCourse, UserId};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Words};

const MATERIALS: &[&str] = &["wood", "nails", "saw", "glue", "sandpaper", "paint", "drill"];

/// Generates `per_owner` courses for each owner.
pub fn generate_courses(owners: &[UserId], per_owner: usize) -> Vec<NewCourse> {
    owners
        .iter()
        .enumerate()
        .flat_map(|(owner_idx, &owner)| {
            (0..per_owner).map(move |course_idx| {
                let words: Vec<String> = Words(2..5).fake();
                let hours: u8 = (1u8..40).fake();
                let materials: Vec<&str> = (0..(1usize..4).fake::<usize>())
                    .map(|i| MATERIALS[(owner_idx + course_idx + i) % MATERIALS.len()])
                    .collect();
                NewCourse {
                    title: format!("{} #{}", words.join(" "), owner_idx * 1000 + course_idx),
                    description: Paragraph(2..4).fake(),
                    estimated_time: Some(format!("{hours} hours")),
                    materials_needed: Some(materials.join(", ")),
                    user_id: owner,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn titles_are_unique_and_owned() {
        let owners = [UserId::new(1), UserId::new(2)];
        let courses = generate_courses(&owners, 4);
        assert_eq!(courses.len(), 8);

        let titles: HashSet<_> = courses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles.len(), 8);
        assert_eq!(
            courses.iter().filter(|c| c.user_id == UserId::new(2)).count(),
            4
        );
    }
}
