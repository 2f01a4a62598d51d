// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Daily market analysis prompt template.
/// Replace: {industry}, {candidate_type}, {language}, {date},
///          {sourcing_instruction}, {output_instruction}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Role: You are a senior career consultant and industry analyst covering the Chinese job market.
Task: Analyze the {industry} industry as of today ({date}) for {candidate_type}.
Focus: Non-technical roles (Product, Marketing, Operations, Sales, HR, Strategy/Analysis).
LANGUAGE: Write every text value strictly in {language}.

{sourcing_instruction}

Steps:
1. Search for the latest news (last 24-48 hours) in the {industry} sector.
2. MARKET SENTIMENT:
   - Summarize the current hiring sentiment.
   - Back the summary with official data (percentages, YoY growth) and recent government policy
     (NDRC, MIIT, Ministry of Human Resources and Social Security, Five-Year Plans).
   - Extract 3-5 high-level keywords.
   - List concrete opportunity points (where the jobs are) and concrete risks (what to avoid).
3. Estimate a hiring volume index (0-100) and a difficulty index (0-100) for 4-5 non-technical job categories.
4. Identify the top 5 hub cities in China for these roles, each with a heat index (0-100).
5. Recommend companies in exactly 3 categories (for example "Industry Giants", "High-Growth Unicorns",
   "Emerging/Niche Startups"). Results are filtered by city downstream, so for EACH category list
   8-10 companies for EACH of: Beijing, Shanghai, Guangzhou, Shenzhen, Hangzhou.
   Every company needs "name", "location" (exactly one of those city names, written in {language})
   and "scale" (market cap, valuation or head count).
6. For 2-3 role categories describe hard skills, soft skills, one success tip, the preferred student
   profile (majors, personality, background) and a capabilityBreakdown over
   "Internship Experience", "Academic Background", "Soft Skills", "Hard Skills" whose percentages sum to 100.
7. Give a year-by-year guide from university year 1 to year 4.

Output format:
{output_instruction}
The structure must be exactly:
{
  "date": "{date}",
  "industry": "{industry}",
  "news": [
    { "title": "News Title", "summary": "Short summary", "source": "Source Name" }
  ],
  "marketSentiment": {
    "summary": "Summary citing official statistics and policy backing",
    "keywords": ["Keyword 1", "Keyword 2", "Keyword 3"],
    "opportunities": ["Opportunity 1", "Opportunity 2"],
    "risks": ["Risk 1", "Risk 2"]
  },
  "jobStats": [
    { "role": "Product Manager", "volumeIndex": 75, "difficulty": 80, "primarySkill": "Data Analysis" }
  ],
  "skills": [
    {
      "roleCategory": "Product/Strategy",
      "hardSkills": ["Skill 1", "Skill 2"],
      "softSkills": ["Skill A", "Skill B"],
      "successTip": "Specific advice",
      "preferredStudentProfile": "Who tends to get the offer",
      "capabilityBreakdown": [
        { "name": "Internship Experience", "percentage": 40 },
        { "name": "Academic Background", "percentage": 30 },
        { "name": "Hard Skills", "percentage": 20 },
        { "name": "Soft Skills", "percentage": 10 }
      ]
    }
  ],
  "yearlyGuide": [
    { "year": "大一 (Freshman)", "focus": "Exploration", "recommendedRoles": ["Role A", "Role B"], "reasoning": "Why" }
  ],
  "topCities": [
    { "name": "Beijing", "heatIndex": 95, "desc": "Why this city is hot" }
  ],
  "recommendedCompanies": [
    {
      "categoryName": "Industry Giants",
      "description": "Pros and cons of working here",
      "companies": [
        { "name": "Company A", "location": "Beijing", "scale": "100B USD market cap" }
      ]
    }
  ],
  "bestOpportunityRole": "Name of the role"
}"#;
