//! Email templates for password recovery passcodes.

/// Content for passcode emails.
pub struct OtpEmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OtpEmailContent {
    /// Create passcode email content
    pub fn new(code: &str, platform_name: &str, expiry_minutes: i64) -> Self {
        Self {
            subject: format!("Your {} password reset code", platform_name),
            text: Self::text_template(code, platform_name, expiry_minutes),
            html: Self::html_template(code, platform_name, expiry_minutes),
        }
    }

    fn text_template(code: &str, platform_name: &str, expiry_minutes: i64) -> String {
        format!(
            r#"We received a request to reset your {platform} password.

Your one-time code is: {code}

This code will expire in {minutes} minutes.

If you didn't request a password reset, you can ignore this email. Your password will not change.

--
{platform} Support"#,
            platform = platform_name,
            code = code,
            minutes = expiry_minutes
        )
    }

    fn html_template(code: &str, platform_name: &str, expiry_minutes: i64) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background: #f5f5f5; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 40px 20px; }}
        .card {{ background: white; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        h1 {{ color: #1a1a1a; margin-top: 0; font-size: 22px; }}
        .code {{ font-size: 34px; font-weight: bold; letter-spacing: 8px; color: #0f766e; text-align: center; padding: 24px; background: #effaf8; border-radius: 8px; margin: 24px 0; font-family: 'SF Mono', Monaco, monospace; }}
        .expires {{ color: #666; font-size: 14px; text-align: center; }}
        .footer {{ margin-top: 32px; padding-top: 20px; border-top: 1px solid #eee; color: #888; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="card">
            <h1>Reset your {platform} password</h1>
            <p>Use this one-time code to continue:</p>
            <div class="code">{code}</div>
            <p class="expires">This code will expire in {minutes} minutes.</p>
            <div class="footer">
                <p>If you didn't request a password reset, you can ignore this email. Your password will not change.</p>
                <p>{platform} Support</p>
            </div>
        </div>
    </div>
</body>
</html>"#,
            platform = platform_name,
            code = code,
            minutes = expiry_minutes
        )
    }
}
