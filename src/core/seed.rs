use crate::domain::model::{NewInstructor, NewStudent};

/// A course in the seed plan; `instructor` indexes into [`SeedPlan::instructors`].
#[derive(Debug, Clone)]
pub struct SeedCourse {
    pub course_code: &'static str,
    pub course_name: &'static str,
    pub credits: u8,
    pub instructor: usize,
}

/// The fixed sample dataset. Cross references are positional so the plan
/// does not depend on which ids the allocator hands out.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub students: Vec<NewStudent>,
    pub instructors: Vec<NewInstructor>,
    pub courses: Vec<SeedCourse>,
    /// `(course index, student index)` pairs.
    pub enrollments: Vec<(usize, usize)>,
}

fn student(first: &str, last: &str, number: &str, email: &str) -> NewStudent {
    NewStudent {
        first_name: first.to_string(),
        last_name: last.to_string(),
        student_number: number.to_string(),
        email: Some(email.to_string()),
    }
}

fn instructor(first: &str, last: &str, title: &str, department: &str, email: &str) -> NewInstructor {
    NewInstructor {
        first_name: first.to_string(),
        last_name: last.to_string(),
        title: title.to_string(),
        email: Some(email.to_string()),
        department: Some(department.to_string()),
    }
}

pub fn sample_data() -> SeedPlan {
    SeedPlan {
        students: vec![
            student("John", "Doe", "20230001", "john.doe@university.edu"),
            student("Jane", "Smith", "20230002", "jane.smith@university.edu"),
            student("Michael", "Johnson", "20230003", "michael.j@university.edu"),
            student("Emily", "Brown", "20230004", "emily.brown@university.edu"),
        ],
        instructors: vec![
            instructor("Robert", "Williams", "Professor", "Computer Science", "r.williams@university.edu"),
            instructor("Sarah", "Davis", "Associate Professor", "Mathematics", "s.davis@university.edu"),
            instructor("David", "Miller", "Assistant Professor", "Physics", "d.miller@university.edu"),
        ],
        courses: vec![
            SeedCourse {
                course_code: "CS101",
                course_name: "Introduction to Programming",
                credits: 4,
                instructor: 0,
            },
            SeedCourse {
                course_code: "MATH201",
                course_name: "Calculus II",
                credits: 3,
                instructor: 1,
            },
            SeedCourse {
                course_code: "PHY101",
                course_name: "General Physics",
                credits: 4,
                instructor: 2,
            },
            SeedCourse {
                course_code: "CS202",
                course_name: "Data Structures and Algorithms",
                credits: 4,
                instructor: 0,
            },
        ],
        enrollments: vec![(0, 0), (1, 1), (2, 0), (3, 2)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_shape() {
        let plan = sample_data();
        assert_eq!(plan.students.len(), 4);
        assert_eq!(plan.instructors.len(), 3);
        assert_eq!(plan.courses.len(), 4);
        assert_eq!(plan.enrollments.len(), 4);
    }

    #[test]
    fn test_sample_data_references_are_in_bounds() {
        let plan = sample_data();
        for course in &plan.courses {
            assert!(course.instructor < plan.instructors.len());
        }
        for (course, student) in &plan.enrollments {
            assert!(*course < plan.courses.len());
            assert!(*student < plan.students.len());
        }
    }
}
