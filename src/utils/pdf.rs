//! 项目报告 PDF 渲染
//!
//! 单页 A4，内置 Helvetica 字体，固定坐标布局。

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

use crate::errors::{Result, TrackerError};
use crate::models::profiles::entities::StudentProfile;
use crate::models::projects::entities::Project;

// printpdf 0.6 的 Mm/Pt 都是 f32 元组结构
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_PT: f32 = 50.0;
const LINE_HEIGHT_PT: f32 = 14.0;

fn pos(x_pt: f32, y_pt: f32) -> (Mm, Mm) {
    (Mm::from(Pt(x_pt)), Mm::from(Pt(y_pt)))
}

/// 渲染项目报告为 PDF 字节流
pub fn render_project_report(project: &Project, student: &StudentProfile) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Project Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| TrackerError::report_render(format!("Font loading failed: {e}")))?;

    let layer = doc.get_page(page).get_layer(layer);

    let (x, y) = pos(LEFT_MARGIN_PT, 800.0);
    layer.use_text(
        format!("Project Report: {}", project.title),
        14.0,
        x,
        y,
        &font,
    );

    let header_lines = [
        format!(
            "Student: {} ({})",
            student.username, student.register_number
        ),
        format!("Domain: {}", project.domain),
        format!("Status: {}", project.status.label()),
    ];
    let mut y_pt = 780.0;
    for line in header_lines {
        let (x, y) = pos(LEFT_MARGIN_PT, y_pt);
        layer.use_text(line, 11.0, x, y, &font);
        y_pt -= 20.0;
    }

    // 正文块：描述 + 教师评语，逐行绘制
    let body = format!(
        "Description:\n{}\n\nFaculty Remarks:\n{}",
        project.description, project.faculty_remarks
    );
    let mut y_pt = 720.0;
    for line in body.lines() {
        let (x, y) = pos(LEFT_MARGIN_PT, y_pt);
        layer.use_text(line, 11.0, x, y, &font);
        y_pt -= LINE_HEIGHT_PT;
        if y_pt < 40.0 {
            break; // 超出单页的内容截断
        }
    }

    doc.save_to_bytes()
        .map_err(|e| TrackerError::report_render(format!("PDF serialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profiles::entities::StudentProfile;
    use crate::models::projects::entities::ProjectStatus;

    fn sample_project() -> Project {
        Project {
            id: 1,
            student_id: 1,
            title: "AI Chatbot".to_string(),
            domain: "AI".to_string(),
            description: "A conversational agent for campus FAQ answering.".to_string(),
            status: ProjectStatus::Approved,
            faculty_reviewer_id: Some(1),
            faculty_remarks: "Solid proposal.".to_string(),
            attachment_path: None,
            attachment_name: None,
            submitted_at: chrono::Utc::now(),
            reviewed_at: Some(chrono::Utc::now()),
            updated_at: chrono::Utc::now(),
        }
    }

    fn sample_student() -> StudentProfile {
        StudentProfile {
            id: 1,
            user_id: 1,
            username: "alice".to_string(),
            register_number: "REG1".to_string(),
            department: "CSE".to_string(),
            year: 2,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_project_report(&sample_project(), &sample_student()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_handles_empty_remarks() {
        let mut project = sample_project();
        project.faculty_remarks = String::new();
        let bytes = render_project_report(&project, &sample_student()).unwrap();
        assert!(!bytes.is_empty());
    }
}
