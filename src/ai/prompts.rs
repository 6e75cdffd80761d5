//! Instruction templates for the completion providers. Pure formatting:
//! typed request fields in, one prompt string out.

/// Ad-platform recommendation prompt for the strategist persona. Asks for
/// the six-section JSON document the recommendation FieldSpec validates.
pub fn platform_recommendation(
    business_name: &str,
    business_description: &str,
    goals: &[String],
    demographics: &[String],
    interests: &[String],
    location: &str,
    industry: &str,
) -> String {
    format!(
        r#"You are a digital advertising strategist and campaign planner with access to real-time weather and event data.

Your goal is to recommend personalized ad platforms for the business below by combining:
1. Their goals, industry, and target location
2. The current weather forecast in that location
3. Only relevant local events — NOT general ones. Show only events that are directly useful for this business based on their industry or interests.

Be specific:

Each event must include:
- name
- date
- location: {{
    street,
    city,
    state,
    zip,
    mapsLink (Google Maps URL to exact venue),
    eventWebsite (if available)
  }}
- relevance: A brief explanation of why this event is relevant to the business

Your JSON must include:

1. "recommendedPlatforms": [
    {{
      "name": "Platform Name",
      "matchScore": number (0-100),
      "rationale": "Why this is a good fit for the business",
      "campaignTypes": ["Video Ads", "Display Ads", "Podcast Ads", ...]
    }}
  ]

2. "notRecommendedPlatforms": [
    {{
      "name": "Platform Name",
      "matchScore": number (0-100),
      "rationale": "Why this platform is not suitable for this business"
    }}
  ]

3. "keywords": {{
   "globalKeywords": [...],
   "localKeywords": [...]
}}

4. "competitors": [
  {{
    "name": "Competitor Name",
    "description": "What they do",
    "estimatedMonthlyTraffic": "Number or N/A",
    "marketingChannels": ["Facebook", "Google Ads", ...],
    "strength": "What they do well",
    "weakness": "What they lack"
  }}
]

5. "strategyTips": 3 suggestions for boosting results

6. "localContext": {{
   "weatherSummary": "...",
   "eventsSummary": [
     {{
       "name": "...",
       "date": "...",
       "location": {{
         "street": "...",
         "city": "...",
         "state": "...",
         "zip": "...",
         "mapsLink": "...",
         "eventWebsite": "..."
       }},
       "relevance": "..."
     }}
   ]
}}

Business Info:
- Name: {name}
- Description: {description}
- Goals: {goals}
- Demographics: {demographics}
- Interests: {interests}
- Location: {location}
- Industry: {industry}

Return valid JSON only."#,
        name = business_name,
        description = business_description,
        goals = goals.join(", "),
        demographics = demographics.join(", "),
        interests = interests.join(", "),
        location = location,
        industry = industry,
    )
}

/// Social caption generation prompt for the content strategist persona.
pub fn content_captions(
    business_name: &str,
    business_description: &str,
    goals: &[String],
    demographics: &[String],
    interests: &[String],
    location: &str,
    industry: &str,
) -> String {
    format!(
        r#"You are a content strategist helping businesses create high-performing social media content.

Given the following business details, generate:

1. A recommended platform (e.g., Instagram, Facebook, LinkedIn) for marketing.
2. 3-4 short social media captions tailored for that platform, based on:
  - the business description
  - the goals
  - the audience demographics
  - industry
  - location

3. After each caption, explain why it works for that business and target audience.
4. Recommend hashtags relevant to each caption.

Return a clean JSON with:
{{
  "recommendedPlatform": "Platform Name",
  "captions": [
    {{
      "text": "...",
      "rationale": "...",
      "hashtags": ["...", "..."]
    }},
    ...
  ]
}}

Business Info:
- Name: {name}
- Description: {description}
- Goals: {goals}
- Demographics: {demographics}
- Interests: {interests}
- Location: {location}
- Industry: {industry}"#,
        name = business_name,
        description = business_description,
        goals = goals.join(", "),
        demographics = demographics.join(", "),
        interests = interests.join(", "),
        location = location,
        industry = industry,
    )
}

/// 10-second video commercial script prompt. Plain-text response; no JSON
/// recovery runs on it.
#[allow(clippy::too_many_arguments)]
pub fn video_ad_script(
    platform: &str,
    main_product: &str,
    business_name: &str,
    city_state: &str,
    scene_start: &str,
    weather: &str,
    num_characters: &str,
    tone: &str,
    keyword: &str,
    cta: &str,
    audience: &str,
    business_description: &str,
) -> String {
    format!(
        r#"You are a professional digital ad scriptwriter.

Create a 10-second commercial script for {platform}.
Purpose: Promote {product} for {name} in {city_state}.

Include:
- Timestamps like "0-4 sec: Scene 1", "5-10 sec: Scene 2"
- Describe the scene visually and who says what.
- Use cinematic, engaging, natural language.
- Make it creative and concise.
- Avoid contact number and website mentions. The user will edit that later.

Inputs:
- Scene Start: {scene_start}
- Weather: {weather}
- Characters: {num_characters}
- Tone: {tone}
- Keyword: {keyword}
- CTA: {cta}
- Audience: {audience}
- Business Description: {description}

Structure:
0-4 sec: Scene 1 [description + dialogue]
4-7 sec: Scene 2 [description + dialogue]
8-10 sec: Scene 3 or CTA conclusion

Return only the script as plain text."#,
        platform = platform,
        product = main_product,
        name = business_name,
        city_state = city_state,
        scene_start = scene_start,
        weather = weather,
        num_characters = num_characters,
        tone = tone,
        keyword = keyword,
        cta = cta,
        audience = audience,
        description = business_description,
    )
}

/// Image ad caption prompt for static ads.
#[allow(clippy::too_many_arguments)]
pub fn image_ad_caption(
    platform: &str,
    business_name: &str,
    business_description: &str,
    audience: &str,
    city_state: &str,
    topic: &str,
    keyword: &str,
    tone: &str,
    cta: &str,
) -> String {
    format!(
        r#"You are a professional copywriter.

Write an engaging and persuasive image ad caption for {platform}.

Use the following details:
- Business: {name}
- Description: {description}
- Audience: {audience}
- Location: {city_state}
- Topic: {topic}
- Keyword: {keyword}
- Tone: {tone}
- CTA: {cta}

Make sure it's sharp, clear, and scroll-stopping.
Return only the image caption as plain text."#,
        platform = platform,
        name = business_name,
        description = business_description,
        audience = audience,
        city_state = city_state,
        topic = topic,
        keyword = keyword,
        tone = tone,
        cta = cta,
    )
}

/// Visual prompt for the image-generation provider.
#[allow(clippy::too_many_arguments)]
pub fn image_ad_visual(
    business_name: &str,
    business_description: &str,
    offer: &str,
    target_audience: &str,
    goals: &str,
    cta: &str,
    seasonal_theme: &str,
    brand_style: &str,
    script_preview: &str,
) -> String {
    format!(
        r#"Create a professional, realistic, high-quality Instagram image ad for a business. Don't use AI character or avatar images.

Business Name: {name}
Description: {description}
Product/Offer: {offer}
Target Audience: {audience}
Campaign Goals: {goals}
Primary Action (CTA): {cta}
Seasonal/Promotional Theme: {theme}
Brand Style (optional): {brand}
Message Preview: "{preview}..."
Visual Style: realistic photography, soft lighting, clean layout, high resolution, space for text overlays.
Avoid: embedded text in image.
Format: square, 1024x1024"#,
        name = business_name,
        description = business_description,
        offer = offer,
        audience = target_audience,
        goals = goals,
        cta = cta,
        theme = seasonal_theme,
        brand = brand_style,
        preview = script_preview,
    )
}

/// Trending-keyword ideas prompt for the marketing strategist persona.
pub fn trending_keywords(
    business_name: &str,
    business_description: &str,
    industry: &str,
    location: &str,
) -> String {
    format!(
        r#"You are an AI marketing strategist. Based on the business information below, generate a list of top 20 trending and relevant marketing keywords.

- Business Name: {name}
- Description: {description}
- Industry: {industry}
- Location: {location}

Return ONLY a valid JSON list like this:
{{
  "keywords": ["keyword 1", "keyword 2", "keyword 3", ...]
}}"#,
        name = business_name,
        description = business_description,
        industry = industry,
        location = location,
    )
}
