//! Fixed text templates for the mock text backend.
//!
//! Pure: the same (content type, prompt) pair always renders the same
//! bytes. The prompt is substituted into every slot of the template.

use super::text::ContentType;

/// Render the template for `content_type` with `prompt` in every slot.
pub fn render(content_type: ContentType, prompt: &str) -> String {
    match content_type {
        ContentType::Blog => blog(prompt),
        ContentType::Email => email(prompt),
        ContentType::Story => story(prompt),
        ContentType::Poem => poem(prompt),
    }
}

fn blog(p: &str) -> String {
    format!(
        "# {p}\n\n\
This is a comprehensive blog post about \"{p}\". The topic is fascinating and has many aspects worth exploring. In this article, we'll dive deep into the subject matter and provide valuable insights.\n\n\
## Introduction\n\n\
The world of {p} is constantly evolving, bringing new opportunities and challenges. Understanding the fundamentals is crucial for anyone looking to make an impact in this field.\n\n\
## Key Points\n\n\
1. **Understanding the Basics**: First and foremost, it's important to grasp the core concepts.\n\
2. **Practical Applications**: Real-world applications demonstrate the value of this knowledge.\n\
3. **Future Trends**: Looking ahead, we can see exciting developments on the horizon.\n\n\
## Conclusion\n\n\
In conclusion, {p} represents a significant area of interest with tremendous potential. As we continue to explore and innovate, the possibilities are endless."
    )
}

fn email(p: &str) -> String {
    format!(
        "Subject: {p}\n\n\
Dear [Recipient],\n\n\
I hope this email finds you well. I'm writing to discuss {p}.\n\n\
This is an important topic that I believe warrants our attention. I would appreciate the opportunity to discuss this further at your earliest convenience.\n\n\
Please let me know if you have any questions or would like to schedule a meeting.\n\n\
Best regards,\n\
[Your Name]"
    )
}

fn story(p: &str) -> String {
    format!(
        "Once upon a time, there was a story about {p}.\n\n\
In a world where {p} was the center of everything, our protagonist embarked on an incredible journey. The adventure began when they discovered something extraordinary related to {p}.\n\n\
As the story unfolded, challenges arose, but with determination and creativity, our hero overcame each obstacle. The tale reached its climax when the true nature of {p} was revealed.\n\n\
In the end, the journey taught valuable lessons about {p}, leaving readers with a sense of wonder and inspiration."
    )
}

fn poem(p: &str) -> String {
    format!(
        "Ode to {p}\n\n\
In realms of thought where {p} dwells,\n\
A story that the heart compels.\n\
Through valleys deep and mountains high,\n\
We seek the truth, we question why.\n\n\
{p}, a concept vast and wide,\n\
Where dreams and reality collide.\n\
In every verse, a new insight,\n\
That makes our world more bright.\n\n\
So let us celebrate this theme,\n\
And chase this wondrous dream.\n\
For {p} shows us the way,\n\
To a brighter, better day."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poem_is_pure() {
        assert_eq!(render(ContentType::Poem, "love"), render(ContentType::Poem, "love"));
    }

    #[test]
    fn poem_substitutes_every_slot() {
        let out = render(ContentType::Poem, "love");
        assert_eq!(out.matches("love").count(), 4);
        assert!(out.starts_with("Ode to love\n\n"));
        assert!(out.contains("\nlove, a concept vast and wide,\n"));
        assert!(out.ends_with("To a brighter, better day."));
        assert!(!out.contains('{'));
    }

    #[test]
    fn slot_counts_per_template() {
        let marker = "ZQX";
        assert_eq!(render(ContentType::Blog, marker).matches(marker).count(), 4);
        assert_eq!(render(ContentType::Email, marker).matches(marker).count(), 2);
        assert_eq!(render(ContentType::Story, marker).matches(marker).count(), 5);
        assert_eq!(render(ContentType::Poem, marker).matches(marker).count(), 4);
    }

    #[test]
    fn email_layout() {
        let out = render(ContentType::Email, "budget");
        assert!(out.starts_with("Subject: budget\n\nDear [Recipient],\n\n"));
        assert!(out.ends_with("Best regards,\n[Your Name]"));
    }

    #[test]
    fn blog_keeps_markdown_structure() {
        let out = render(ContentType::Blog, "gardening");
        assert!(out.starts_with("# gardening\n\n"));
        assert!(out.contains("blog post about \"gardening\"."));
        assert!(out.contains("\n\n## Key Points\n\n1. **Understanding the Basics**"));
        assert!(out.contains("horizon.\n\n## Conclusion\n\n"));
    }

    #[test]
    fn story_opening() {
        let out = render(ContentType::Story, "dragons");
        assert!(out.starts_with("Once upon a time, there was a story about dragons.\n\n"));
    }

    #[test]
    fn prompt_with_braces_is_inserted_verbatim() {
        let out = render(ContentType::Email, "{p} & {}");
        assert!(out.starts_with("Subject: {p} & {}\n\n"));
    }
}
