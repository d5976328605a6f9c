use crate::adapters::http::forms::{
    parse_reference, CourseForm, EnrollForm, InstructorForm, StudentForm,
};
use crate::adapters::http::{redirect_with_notice, AppState, OrPage, PageResult};
use crate::core::{CourseId, DisplayInfo, PersonId};
use crate::utils::error::{EntityKind, RegistryError, Result};
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

fn page(state: &AppState, html: Result<String>) -> PageResult {
    Ok(Html(html.or_page(state)?).into_response())
}

fn invalid_form(state: &AppState, html: Result<String>) -> PageResult {
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html.or_page(state)?)).into_response())
}

fn course_id(raw: &str) -> Result<CourseId> {
    parse_reference(EntityKind::Course, "id", Some(raw)).map(CourseId)
}

pub async fn index(State(state): State<AppState>) -> PageResult {
    page(&state, state.views.index_page(&state.directory.summary()))
}

pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> PageResult {
    let html = state
        .views
        .students_page(&state.directory.list_students(), query.notice.as_deref());
    page(&state, html)
}

pub async fn new_student(State(state): State<AppState>) -> PageResult {
    page(&state, state.views.student_form_page(&StudentForm::default(), &[]))
}

pub async fn create_student(State(state): State<AppState>, Form(form): Form<StudentForm>) -> PageResult {
    match form.to_draft() {
        Ok(draft) => {
            let student = state.directory.add_student(draft);
            tracing::debug!("{}", student.display_info());
            Ok(redirect_with_notice(
                "/students",
                &format!("Student {} added successfully!", student.full_name()),
            ))
        }
        Err(RegistryError::Validation { errors }) => {
            invalid_form(&state, state.views.student_form_page(&form, &errors))
        }
        Err(e) => Err(state.page_error(e)),
    }
}

pub async fn list_instructors(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> PageResult {
    let html = state
        .views
        .instructors_page(&state.directory.list_instructors(), query.notice.as_deref());
    page(&state, html)
}

pub async fn new_instructor(State(state): State<AppState>) -> PageResult {
    page(&state, state.views.instructor_form_page(&InstructorForm::default(), &[]))
}

pub async fn create_instructor(
    State(state): State<AppState>,
    Form(form): Form<InstructorForm>,
) -> PageResult {
    match form.to_draft() {
        Ok(draft) => {
            let instructor = state.directory.add_instructor(draft);
            tracing::debug!("{}", instructor.display_info());
            Ok(redirect_with_notice(
                "/instructors",
                &format!("Instructor {} added successfully!", instructor.full_title()),
            ))
        }
        Err(RegistryError::Validation { errors }) => {
            invalid_form(&state, state.views.instructor_form_page(&form, &errors))
        }
        Err(e) => Err(state.page_error(e)),
    }
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> PageResult {
    let html = state
        .views
        .courses_page(&state.directory.list_courses(), query.notice.as_deref());
    page(&state, html)
}

pub async fn new_course(State(state): State<AppState>) -> PageResult {
    let html = state.views.course_form_page(
        &CourseForm::default(),
        &[],
        &state.directory.list_instructors(),
    );
    page(&state, html)
}

pub async fn create_course(State(state): State<AppState>, Form(form): Form<CourseForm>) -> PageResult {
    match form.to_draft() {
        Ok(draft) => {
            let course = state.directory.add_course(draft);
            Ok(redirect_with_notice(
                "/courses",
                &format!(
                    "Course {} - {} added successfully!",
                    course.course_code, course.course_name
                ),
            ))
        }
        Err(RegistryError::Validation { errors }) => {
            let html = state.views.course_form_page(
                &form,
                &errors,
                &state.directory.list_instructors(),
            );
            invalid_form(&state, html)
        }
        Err(e) => Err(state.page_error(e)),
    }
}

pub async fn course_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> PageResult {
    let course = course_id(&id)
        .and_then(|id| state.directory.get_course(id))
        .or_page(&state)?;
    page(&state, state.views.course_details_page(&course, query.notice.as_deref()))
}

pub async fn enroll_form(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let course = course_id(&id)
        .and_then(|id| state.directory.get_course(id))
        .or_page(&state)?;
    page(&state, state.views.enroll_page(&course, &state.directory.list_students()))
}

pub async fn enroll(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EnrollForm>,
) -> PageResult {
    let course_id = course_id(&id).or_page(&state)?;
    let student_id = parse_reference(EntityKind::Student, "student_id", form.student_id.as_deref())
        .map(PersonId)
        .or_page(&state)?;
    let course = state
        .directory
        .enroll_student(course_id, student_id)
        .or_page(&state)?;

    let name = course
        .enrolled_students
        .iter()
        .find(|s| s.id() == student_id)
        .map(|s| s.full_name())
        .unwrap_or_default();

    Ok(redirect_with_notice(
        &format!("/courses/{}", course.id),
        &format!("Student {} enrolled in {} successfully!", name, course.course_code),
    ))
}
