/// 用户名：不允许为空白
///
/// 注册只因空白字段或唯一键冲突而失败，不附加格式或长度策略。
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        return Err("Username is required");
    }
    Ok(())
}

/// 密码：不允许为空白
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.trim().is_empty() {
        return Err("Password is required");
    }
    Ok(())
}

/// 项目标题：去除首尾空白后至少 3 个字符
pub fn validate_project_title(title: &str) -> Result<(), &'static str> {
    if title.trim().chars().count() < 3 {
        return Err("Title must be at least 3 characters long");
    }
    Ok(())
}

/// 项目描述：去除首尾空白后至少 10 个字符
pub fn validate_project_description(description: &str) -> Result<(), &'static str> {
    if description.trim().chars().count() < 10 {
        return Err("Description must be at least 10 characters long");
    }
    Ok(())
}

/// 项目领域：不允许为空白
pub fn validate_project_domain(domain: &str) -> Result<(), &'static str> {
    if domain.trim().is_empty() {
        return Err("Domain is required");
    }
    Ok(())
}

/// 学年：1 到 4
pub fn validate_year(year: i32) -> Result<(), &'static str> {
    if !(1..=4).contains(&year) {
        return Err("Year must be between 1 and 4");
    }
    Ok(())
}

/// 学号/工号等唯一标识：不允许为空白
pub fn validate_identifier(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("This field is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_only_reject_blank() {
        // alice / pw 这样的短凭据是合法的注册输入
        assert!(validate_username("alice").is_ok());
        assert!(validate_password("pw").is_ok());
        assert!(validate_username("al").is_ok());
        assert!(validate_password("SecurePass123").is_ok());
    }

    #[test]
    fn test_blank_credentials_rejected() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_password("").is_err());
        assert!(validate_password("   ").is_err());
    }

    #[test]
    fn test_title_min_length() {
        assert!(validate_project_title("AI").is_err());
        assert!(validate_project_title("  AI ").is_err());
        assert!(validate_project_title("AI Chatbot").is_ok());
    }

    #[test]
    fn test_description_min_length() {
        assert!(validate_project_description("too short").is_err());
        assert!(
            validate_project_description("A conversational agent for campus FAQ answering.")
                .is_ok()
        );
        // 仅空白字符不计入长度
        assert!(validate_project_description("          ").is_err());
    }

    #[test]
    fn test_year_range() {
        assert!(validate_year(1).is_ok());
        assert!(validate_year(4).is_ok());
        assert!(validate_year(0).is_err());
        assert!(validate_year(5).is_err());
    }
}
