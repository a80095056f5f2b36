//! The blueprints that ship with Stencil.
//!
//! Five independent Spring Boot services, generated side by side under the
//! base directory in this order:
//!
//! | Blueprint                | Package                 |
//! |--------------------------|-------------------------|
//! | `api-gateway`            | `com.example.gateway`   |
//! | `event-stream-processor` | `com.example.events`    |
//! | `ml-inference-service`   | `com.example.inference` |
//! | `crypto-vault`           | `com.example.vault`     |
//! | `analytics-pipeline`     | `com.example.analytics` |
//!
//! Everything here is data. Java sources are added with
//! [`BlueprintBuilder::source`] so they receive the license header; their
//! templates must never contain it themselves.

use stencil_core::domain::{Blueprint, BlueprintBuilder, Dependency, DomainError, Documentation, TemplateContent};

/// Spring Boot release every built-in blueprint targets.
pub const SPRING_BOOT_VERSION: &str = "3.2.5";

/// Maven `pom.xml` document. `{{DEPENDENCIES}}` receives one rendered
/// [`MAVEN_DEPENDENCY`] entry per declared dependency.
pub const MAVEN_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>{{SPRING_BOOT_VERSION}}</version>
        <relativePath/>
    </parent>

    <groupId>{{PACKAGE}}</groupId>
    <artifactId>{{PROJECT_NAME}}</artifactId>
    <version>0.1.0-SNAPSHOT</version>
    <name>{{PROJECT_NAME}}</name>
    <description>{{DESCRIPTION}}</description>

    <properties>
        <java.version>{{JAVA_VERSION}}</java.version>
        <maven.compiler.release>{{JAVA_VERSION}}</maven.compiler.release>
        <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
    </properties>

    <dependencies>
{{DEPENDENCIES}}
    </dependencies>

    <build>
        <plugins>
            <plugin>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-maven-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#;

/// One `<dependency>` element. Fields: `groupId`, `artifactId`, `version`,
/// `scope`.
pub const MAVEN_DEPENDENCY: &str = "        <dependency>
            <groupId>{{groupId}}</groupId>
            <artifactId>{{artifactId}}</artifactId>
            <version>{{version}}</version>
            <scope>{{scope}}</scope>
        </dependency>";

/// All built-in blueprints, in generation order.
pub fn all() -> Result<Vec<Blueprint>, DomainError> {
    Ok(vec![
        api_gateway()?,
        event_stream_processor()?,
        ml_inference_service()?,
        crypto_vault()?,
        analytics_pipeline()?,
    ])
}

/// Names of the built-in blueprints, in generation order.
pub const NAMES: [&str; 5] = [
    "api-gateway",
    "event-stream-processor",
    "ml-inference-service",
    "crypto-vault",
    "analytics-pipeline",
];

// ── Dependency helpers ────────────────────────────────────────────────────────

/// Compile-scope Maven coordinate.
pub fn maven(group: &str, artifact: &str, version: &str) -> Dependency {
    maven_scoped(group, artifact, version, "compile")
}

pub fn maven_scoped(group: &str, artifact: &str, version: &str, scope: &str) -> Dependency {
    Dependency::new()
        .field("groupId", group)
        .field("artifactId", artifact)
        .field("version", version)
        .field("scope", scope)
}

fn boot(artifact: &str) -> Dependency {
    maven("org.springframework.boot", artifact, SPRING_BOOT_VERSION)
}

fn boot_test() -> Dependency {
    maven_scoped(
        "org.springframework.boot",
        "spring-boot-starter-test",
        SPRING_BOOT_VERSION,
        "test",
    )
}

/// Shared Maven/Spring Boot skeleton.
fn spring_service(name: &str, package: &str) -> BlueprintBuilder {
    Blueprint::builder(name)
        .language("java")
        .package(package)
        .manifest(
            "pom.xml",
            TemplateContent::parameterized(MAVEN_POM),
            TemplateContent::parameterized(MAVEN_DEPENDENCY),
        )
        .param("SPRING_BOOT_VERSION", SPRING_BOOT_VERSION)
}

fn main_java(package: &str, class: &str) -> String {
    format!("src/main/java/{}/{}.java", package.replace('.', "/"), class)
}

fn test_java(package: &str, class: &str) -> String {
    format!("src/test/java/{}/{}.java", package.replace('.', "/"), class)
}

const ENTRY_POINT: &str = "package {{PACKAGE}};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

/**
 * Entry point for {{PROJECT_NAME}}.
 *
 * {{DESCRIPTION}}
 */
@SpringBootApplication
public class {{PROJECT_NAME_PASCAL}}Application {

    public static void main(String[] args) {
        SpringApplication.run({{PROJECT_NAME_PASCAL}}Application.class, args);
    }
}
";

const CONTEXT_TEST: &str = "package {{PACKAGE}};

import org.junit.jupiter.api.Test;
import org.springframework.boot.test.context.SpringBootTest;

@SpringBootTest
class {{PROJECT_NAME_PASCAL}}ApplicationTests {

    @Test
    void contextLoads() {
    }
}
";

// ── api-gateway ───────────────────────────────────────────────────────────────

pub fn api_gateway() -> Result<Blueprint, DomainError> {
    const PKG: &str = "com.example.gateway";

    spring_service("api-gateway", PKG)
        .docs(
            Documentation::new("Reactive API gateway routing and protecting downstream services")
                .feature("Declarative route table with path rewriting")
                .feature("Per-route circuit breakers")
                .feature("Request logging with correlation ids")
                .feature("Health and metrics endpoints")
                .tech("Spring Boot")
                .tech("Spring Cloud Gateway")
                .tech("Resilience4j"),
        )
        .param("SERVER_PORT", "8080")
        .dependency(boot("spring-boot-starter-webflux"))
        .dependency(boot("spring-boot-starter-actuator"))
        .dependency(maven(
            "org.springframework.cloud",
            "spring-cloud-starter-gateway",
            "4.1.2",
        ))
        .dependency(maven(
            "io.github.resilience4j",
            "resilience4j-spring-boot3",
            "2.2.0",
        ))
        .dependency(boot_test())
        .file(
            "src/main/resources/application.yml",
            TemplateContent::parameterized(
                "spring:
  application:
    name: {{PROJECT_NAME}}
  cloud:
    gateway:
      default-filters:
        - AddResponseHeader=X-Gateway, {{PROJECT_NAME}}
server:
  port: {{SERVER_PORT}}
gateway:
  upstreams:
    orders: http://localhost:8081
    users: http://localhost:8082
management:
  endpoints:
    web:
      exposure:
        include: health,info,metrics
",
            ),
        )
        .source(main_java(PKG, "ApiGatewayApplication"), TemplateContent::parameterized(ENTRY_POINT))
        .source(
            main_java(PKG, "RouteConfiguration"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import org.springframework.beans.factory.annotation.Value;
import org.springframework.cloud.gateway.route.RouteLocator;
import org.springframework.cloud.gateway.route.builder.RouteLocatorBuilder;
import org.springframework.context.annotation.Bean;
import org.springframework.context.annotation.Configuration;

@Configuration
public class RouteConfiguration {

    @Bean
    public RouteLocator routes(
            RouteLocatorBuilder builder,
            @Value(\"${gateway.upstreams.orders}\") String orders,
            @Value(\"${gateway.upstreams.users}\") String users) {
        return builder.routes()
                .route(\"orders\", r -> r.path(\"/api/orders/**\")
                        .filters(f -> f.stripPrefix(1).circuitBreaker(c -> c.setName(\"orders\")))
                        .uri(orders))
                .route(\"users\", r -> r.path(\"/api/users/**\")
                        .filters(f -> f.stripPrefix(1))
                        .uri(users))
                .build();
    }
}
",
            ),
        )
        .source(
            main_java(PKG, "RequestLoggingFilter"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import java.util.UUID;

import org.slf4j.Logger;
import org.slf4j.LoggerFactory;
import org.springframework.cloud.gateway.filter.GatewayFilterChain;
import org.springframework.cloud.gateway.filter.GlobalFilter;
import org.springframework.core.Ordered;
import org.springframework.stereotype.Component;
import org.springframework.web.server.ServerWebExchange;
import reactor.core.publisher.Mono;

@Component
public class RequestLoggingFilter implements GlobalFilter, Ordered {

    private static final Logger LOG = LoggerFactory.getLogger(RequestLoggingFilter.class);
    static final String CORRELATION_HEADER = \"X-Correlation-Id\";

    @Override
    public Mono<Void> filter(ServerWebExchange exchange, GatewayFilterChain chain) {
        String correlationId = UUID.randomUUID().toString();
        ServerWebExchange tagged = exchange.mutate()
                .request(r -> r.header(CORRELATION_HEADER, correlationId))
                .build();
        long started = System.nanoTime();
        return chain.filter(tagged).doFinally(signal -> LOG.info(
                \"{} {} -> {} in {} ms [{}]\",
                exchange.getRequest().getMethod(),
                exchange.getRequest().getPath(),
                exchange.getResponse().getStatusCode(),
                (System.nanoTime() - started) / 1_000_000,
                correlationId));
    }

    @Override
    public int getOrder() {
        return Ordered.HIGHEST_PRECEDENCE;
    }
}
",
            ),
        )
        .source(test_java(PKG, "ApiGatewayApplicationTests"), TemplateContent::parameterized(CONTEXT_TEST))
        .build()
}

// ── event-stream-processor ────────────────────────────────────────────────────

pub fn event_stream_processor() -> Result<Blueprint, DomainError> {
    const PKG: &str = "com.example.events";

    spring_service("event-stream-processor", PKG)
        .docs(
            Documentation::new("Kafka consumer and producer pipeline that enriches and forwards events")
                .feature("Consumer group with manual acknowledgement")
                .feature("JSON event envelope")
                .feature("Dead-letter topic for poison messages")
                .tech("Spring Boot")
                .tech("Spring for Apache Kafka")
                .tech("Jackson"),
        )
        .param("INPUT_TOPIC", "events.raw")
        .param("OUTPUT_TOPIC", "events.enriched")
        .dependency(boot("spring-boot-starter"))
        .dependency(maven("org.springframework.kafka", "spring-kafka", "3.1.4"))
        .dependency(maven("com.fasterxml.jackson.core", "jackson-databind", "2.15.4"))
        .dependency(boot_test())
        .dependency(maven_scoped(
            "org.springframework.kafka",
            "spring-kafka-test",
            "3.1.4",
            "test",
        ))
        .file(
            "src/main/resources/application.yml",
            TemplateContent::parameterized(
                "spring:
  application:
    name: {{PROJECT_NAME}}
  kafka:
    bootstrap-servers: localhost:9092
    consumer:
      group-id: {{PROJECT_NAME}}
      auto-offset-reset: earliest
      enable-auto-commit: false
    listener:
      ack-mode: manual
processor:
  input-topic: {{INPUT_TOPIC}}
  output-topic: {{OUTPUT_TOPIC}}
  dead-letter-topic: {{INPUT_TOPIC}}.dlt
",
            ),
        )
        .source(
            main_java(PKG, "EventStreamProcessorApplication"),
            TemplateContent::parameterized(ENTRY_POINT),
        )
        .source(
            main_java(PKG, "EventConsumer"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import com.fasterxml.jackson.databind.JsonNode;
import com.fasterxml.jackson.databind.ObjectMapper;
import org.slf4j.Logger;
import org.slf4j.LoggerFactory;
import org.springframework.kafka.annotation.KafkaListener;
import org.springframework.kafka.support.Acknowledgment;
import org.springframework.stereotype.Component;

@Component
public class EventConsumer {

    private static final Logger LOG = LoggerFactory.getLogger(EventConsumer.class);

    private final ObjectMapper mapper;
    private final EventPublisher publisher;

    public EventConsumer(ObjectMapper mapper, EventPublisher publisher) {
        this.mapper = mapper;
        this.publisher = publisher;
    }

    @KafkaListener(topics = \"${processor.input-topic}\")
    public void onMessage(String payload, Acknowledgment ack) {
        try {
            JsonNode event = mapper.readTree(payload);
            publisher.publishEnriched(event);
        } catch (Exception e) {
            LOG.warn(\"Routing unparseable event to dead-letter topic\", e);
            publisher.publishDeadLetter(payload);
        } finally {
            ack.acknowledge();
        }
    }
}
",
            ),
        )
        .source(
            main_java(PKG, "EventPublisher"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import java.time.Instant;

import com.fasterxml.jackson.databind.JsonNode;
import com.fasterxml.jackson.databind.node.ObjectNode;
import org.springframework.beans.factory.annotation.Value;
import org.springframework.kafka.core.KafkaTemplate;
import org.springframework.stereotype.Service;

@Service
public class EventPublisher {

    private final KafkaTemplate<String, String> kafka;
    private final String outputTopic;
    private final String deadLetterTopic;

    public EventPublisher(
            KafkaTemplate<String, String> kafka,
            @Value(\"${processor.output-topic}\") String outputTopic,
            @Value(\"${processor.dead-letter-topic}\") String deadLetterTopic) {
        this.kafka = kafka;
        this.outputTopic = outputTopic;
        this.deadLetterTopic = deadLetterTopic;
    }

    public void publishEnriched(JsonNode event) {
        if (event instanceof ObjectNode node) {
            node.put(\"processedAt\", Instant.now().toString());
            node.put(\"processor\", \"{{PROJECT_NAME}}\");
        }
        kafka.send(outputTopic, event.toString());
    }

    public void publishDeadLetter(String payload) {
        kafka.send(deadLetterTopic, payload);
    }
}
",
            ),
        )
        .source(
            test_java(PKG, "EventStreamProcessorApplicationTests"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import org.junit.jupiter.api.Test;
import org.springframework.boot.test.context.SpringBootTest;
import org.springframework.kafka.test.context.EmbeddedKafka;

@SpringBootTest
@EmbeddedKafka(partitions = 1, topics = {\"{{INPUT_TOPIC}}\", \"{{OUTPUT_TOPIC}}\"})
class {{PROJECT_NAME_PASCAL}}ApplicationTests {

    @Test
    void contextLoads() {
    }
}
",
            ),
        )
        .build()
}

// ── ml-inference-service ──────────────────────────────────────────────────────

pub fn ml_inference_service() -> Result<Blueprint, DomainError> {
    const PKG: &str = "com.example.inference";

    spring_service("ml-inference-service", PKG)
        .docs(
            Documentation::new("Model-serving REST service running ONNX models")
                .feature("Model loaded once at startup")
                .feature("Batch prediction endpoint")
                .feature("Prometheus latency metrics")
                .tech("Spring Boot")
                .tech("ONNX Runtime")
                .tech("Micrometer"),
        )
        .param("SERVER_PORT", "8090")
        .param("MODEL_PATH", "models/model.onnx")
        .dependency(boot("spring-boot-starter-web"))
        .dependency(boot("spring-boot-starter-actuator"))
        .dependency(maven("com.microsoft.onnxruntime", "onnxruntime", "1.17.1"))
        .dependency(maven("io.micrometer", "micrometer-registry-prometheus", "1.12.5"))
        .dependency(boot_test())
        .file(
            "src/main/resources/application.yml",
            TemplateContent::parameterized(
                "spring:
  application:
    name: {{PROJECT_NAME}}
server:
  port: {{SERVER_PORT}}
inference:
  model-path: {{MODEL_PATH}}
  max-batch-size: 64
management:
  endpoints:
    web:
      exposure:
        include: health,prometheus
",
            ),
        )
        .source(
            main_java(PKG, "MlInferenceServiceApplication"),
            TemplateContent::parameterized(ENTRY_POINT),
        )
        .source(
            main_java(PKG, "ModelService"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import java.nio.FloatBuffer;
import java.util.Map;

import ai.onnxruntime.OnnxTensor;
import ai.onnxruntime.OrtEnvironment;
import ai.onnxruntime.OrtException;
import ai.onnxruntime.OrtSession;
import jakarta.annotation.PreDestroy;
import org.springframework.beans.factory.annotation.Value;
import org.springframework.stereotype.Service;

@Service
public class ModelService {

    private final OrtEnvironment environment = OrtEnvironment.getEnvironment();
    private final OrtSession session;

    public ModelService(@Value(\"${inference.model-path}\") String modelPath) throws OrtException {
        this.session = environment.createSession(modelPath, new OrtSession.SessionOptions());
    }

    public float[][] predict(float[][] features) throws OrtException {
        int rows = features.length;
        int cols = rows == 0 ? 0 : features[0].length;
        FloatBuffer buffer = FloatBuffer.allocate(rows * cols);
        for (float[] row : features) {
            buffer.put(row);
        }
        buffer.flip();

        String input = session.getInputNames().iterator().next();
        try (OnnxTensor tensor = OnnxTensor.createTensor(environment, buffer, new long[] {rows, cols});
             OrtSession.Result result = session.run(Map.of(input, tensor))) {
            return (float[][]) result.get(0).getValue();
        }
    }

    @PreDestroy
    void close() throws OrtException {
        session.close();
    }
}
",
            ),
        )
        .source(
            main_java(PKG, "InferenceController"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import ai.onnxruntime.OrtException;
import io.micrometer.core.annotation.Timed;
import org.springframework.web.bind.annotation.PostMapping;
import org.springframework.web.bind.annotation.RequestBody;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

@RestController
@RequestMapping(\"/v1\")
public class InferenceController {

    public record PredictRequest(float[][] instances) {
    }

    public record PredictResponse(float[][] predictions) {
    }

    private final ModelService model;

    public InferenceController(ModelService model) {
        this.model = model;
    }

    @PostMapping(\"/predict\")
    @Timed(\"inference.predict\")
    public PredictResponse predict(@RequestBody PredictRequest request) throws OrtException {
        return new PredictResponse(model.predict(request.instances()));
    }
}
",
            ),
        )
        .source(
            test_java(PKG, "InferenceControllerTests"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import static org.mockito.ArgumentMatchers.any;
import static org.mockito.Mockito.when;
import static org.springframework.test.web.servlet.request.MockMvcRequestBuilders.post;
import static org.springframework.test.web.servlet.result.MockMvcResultMatchers.jsonPath;
import static org.springframework.test.web.servlet.result.MockMvcResultMatchers.status;

import org.junit.jupiter.api.Test;
import org.springframework.beans.factory.annotation.Autowired;
import org.springframework.boot.test.autoconfigure.web.servlet.WebMvcTest;
import org.springframework.boot.test.mock.mockito.MockBean;
import org.springframework.http.MediaType;
import org.springframework.test.web.servlet.MockMvc;

@WebMvcTest(InferenceController.class)
class InferenceControllerTests {

    @Autowired
    private MockMvc mvc;

    @MockBean
    private ModelService model;

    @Test
    void returnsPredictions() throws Exception {
        when(model.predict(any())).thenReturn(new float[][] {new float[] {0.9f}});

        mvc.perform(post(\"/v1/predict\")
                        .contentType(MediaType.APPLICATION_JSON)
                        .content(\"{\\\"instances\\\": [[1.0, 2.0]]}\"))
                .andExpect(status().isOk())
                .andExpect(jsonPath(\"$.predictions[0][0]\").value(0.9));
    }
}
",
            ),
        )
        .build()
}

// ── crypto-vault ──────────────────────────────────────────────────────────────

pub fn crypto_vault() -> Result<Blueprint, DomainError> {
    const PKG: &str = "com.example.vault";

    spring_service("crypto-vault", PKG)
        .docs(
            Documentation::new("Key management and envelope encryption service")
                .feature("AES-256-GCM data keys")
                .feature("Key rotation with versioned key ids")
                .feature("Endpoints secured with HTTP basic auth")
                .tech("Spring Boot")
                .tech("Spring Security")
                .tech("Bouncy Castle"),
        )
        .param("SERVER_PORT", "8443")
        .dependency(boot("spring-boot-starter-web"))
        .dependency(boot("spring-boot-starter-security"))
        .dependency(maven("org.bouncycastle", "bcprov-jdk18on", "1.77"))
        .dependency(boot_test())
        .file(
            "src/main/resources/application.yml",
            TemplateContent::parameterized(
                "spring:
  application:
    name: {{PROJECT_NAME}}
  security:
    user:
      name: vault-admin
      password: change-me
server:
  port: {{SERVER_PORT}}
vault:
  key-size-bits: 256
  rotation-days: 30
",
            ),
        )
        .source(main_java(PKG, "CryptoVaultApplication"), TemplateContent::parameterized(ENTRY_POINT))
        .source(
            main_java(PKG, "KeyManagementService"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import java.nio.ByteBuffer;
import java.security.GeneralSecurityException;
import java.security.SecureRandom;
import java.security.Security;
import java.util.Map;
import java.util.concurrent.ConcurrentHashMap;
import java.util.concurrent.atomic.AtomicInteger;

import javax.crypto.Cipher;
import javax.crypto.KeyGenerator;
import javax.crypto.SecretKey;
import javax.crypto.spec.GCMParameterSpec;

import org.bouncycastle.jce.provider.BouncyCastleProvider;
import org.springframework.beans.factory.annotation.Value;
import org.springframework.stereotype.Service;

@Service
public class KeyManagementService {

    private static final int IV_BYTES = 12;
    private static final int TAG_BITS = 128;

    private final SecureRandom random = new SecureRandom();
    private final Map<Integer, SecretKey> keys = new ConcurrentHashMap<>();
    private final AtomicInteger current = new AtomicInteger();
    private final int keySizeBits;

    public KeyManagementService(@Value(\"${vault.key-size-bits}\") int keySizeBits)
            throws GeneralSecurityException {
        Security.addProvider(new BouncyCastleProvider());
        this.keySizeBits = keySizeBits;
        rotate();
    }

    public int rotate() throws GeneralSecurityException {
        KeyGenerator generator = KeyGenerator.getInstance(\"AES\");
        generator.init(keySizeBits, random);
        int id = current.incrementAndGet();
        keys.put(id, generator.generateKey());
        return id;
    }

    public byte[] encrypt(byte[] plaintext) throws GeneralSecurityException {
        int id = current.get();
        byte[] iv = new byte[IV_BYTES];
        random.nextBytes(iv);
        Cipher cipher = Cipher.getInstance(\"AES/GCM/NoPadding\");
        cipher.init(Cipher.ENCRYPT_MODE, keys.get(id), new GCMParameterSpec(TAG_BITS, iv));
        byte[] sealed = cipher.doFinal(plaintext);
        return ByteBuffer.allocate(4 + IV_BYTES + sealed.length)
                .putInt(id)
                .put(iv)
                .put(sealed)
                .array();
    }

    public byte[] decrypt(byte[] envelope) throws GeneralSecurityException {
        ByteBuffer buffer = ByteBuffer.wrap(envelope);
        SecretKey key = keys.get(buffer.getInt());
        if (key == null) {
            throw new GeneralSecurityException(\"unknown key id\");
        }
        byte[] iv = new byte[IV_BYTES];
        buffer.get(iv);
        byte[] sealed = new byte[buffer.remaining()];
        buffer.get(sealed);
        Cipher cipher = Cipher.getInstance(\"AES/GCM/NoPadding\");
        cipher.init(Cipher.DECRYPT_MODE, key, new GCMParameterSpec(TAG_BITS, iv));
        return cipher.doFinal(sealed);
    }
}
",
            ),
        )
        .source(
            main_java(PKG, "VaultController"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import java.security.GeneralSecurityException;
import java.util.Base64;

import org.springframework.web.bind.annotation.PostMapping;
import org.springframework.web.bind.annotation.RequestBody;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

@RestController
@RequestMapping(\"/vault\")
public class VaultController {

    public record Payload(String data) {
    }

    private final KeyManagementService keys;

    public VaultController(KeyManagementService keys) {
        this.keys = keys;
    }

    @PostMapping(\"/encrypt\")
    public Payload encrypt(@RequestBody Payload plain) throws GeneralSecurityException {
        byte[] sealed = keys.encrypt(plain.data().getBytes());
        return new Payload(Base64.getEncoder().encodeToString(sealed));
    }

    @PostMapping(\"/decrypt\")
    public Payload decrypt(@RequestBody Payload sealed) throws GeneralSecurityException {
        byte[] plain = keys.decrypt(Base64.getDecoder().decode(sealed.data()));
        return new Payload(new String(plain));
    }

    @PostMapping(\"/rotate\")
    public int rotate() throws GeneralSecurityException {
        return keys.rotate();
    }
}
",
            ),
        )
        .source(
            test_java(PKG, "KeyManagementServiceTests"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import static org.junit.jupiter.api.Assertions.assertArrayEquals;

import java.nio.charset.StandardCharsets;

import org.junit.jupiter.api.Test;

class KeyManagementServiceTests {

    @Test
    void roundTripsAcrossRotation() throws Exception {
        KeyManagementService service = new KeyManagementService(256);
        byte[] plain = \"secret\".getBytes(StandardCharsets.UTF_8);

        byte[] sealed = service.encrypt(plain);
        service.rotate();

        assertArrayEquals(plain, service.decrypt(sealed));
    }
}
",
            ),
        )
        .build()
}

// ── analytics-pipeline ────────────────────────────────────────────────────────

pub fn analytics_pipeline() -> Result<Blueprint, DomainError> {
    const PKG: &str = "com.example.analytics";

    spring_service("analytics-pipeline", PKG)
        .docs(
            Documentation::new("Batch analytics job aggregating CSV exports into daily metrics")
                .feature("Chunk-oriented CSV ingestion")
                .feature("Per-category aggregation")
                .feature("Restartable job metadata in an embedded database")
                .tech("Spring Boot")
                .tech("Spring Batch")
                .tech("Apache Commons CSV"),
        )
        .param("INPUT_FILE", "data/input.csv")
        .dependency(boot("spring-boot-starter-batch"))
        .dependency(maven("org.apache.commons", "commons-csv", "1.10.0"))
        .dependency(maven_scoped("com.h2database", "h2", "2.2.224", "runtime"))
        .dependency(boot_test())
        .file(
            "src/main/resources/application.yml",
            TemplateContent::parameterized(
                "spring:
  application:
    name: {{PROJECT_NAME}}
  batch:
    jdbc:
      initialize-schema: always
pipeline:
  input-file: {{INPUT_FILE}}
  chunk-size: 500
",
            ),
        )
        .source(
            main_java(PKG, "AnalyticsPipelineApplication"),
            TemplateContent::parameterized(ENTRY_POINT),
        )
        .source(
            main_java(PKG, "RecordAggregator"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import java.math.BigDecimal;
import java.util.Map;
import java.util.TreeMap;

import org.springframework.stereotype.Component;

@Component
public class RecordAggregator {

    public record Sale(String category, BigDecimal amount) {
    }

    private final Map<String, BigDecimal> totals = new TreeMap<>();

    public synchronized void add(Sale sale) {
        totals.merge(sale.category(), sale.amount(), BigDecimal::add);
    }

    public synchronized Map<String, BigDecimal> snapshot() {
        return Map.copyOf(totals);
    }
}
",
            ),
        )
        .source(
            main_java(PKG, "PipelineConfiguration"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import java.io.FileReader;
import java.io.Reader;
import java.math.BigDecimal;
import java.util.Iterator;

import org.apache.commons.csv.CSVFormat;
import org.apache.commons.csv.CSVRecord;
import org.springframework.batch.core.Job;
import org.springframework.batch.core.Step;
import org.springframework.batch.core.job.builder.JobBuilder;
import org.springframework.batch.core.repository.JobRepository;
import org.springframework.batch.core.step.builder.StepBuilder;
import org.springframework.batch.item.ItemReader;
import org.springframework.beans.factory.annotation.Value;
import org.springframework.context.annotation.Bean;
import org.springframework.context.annotation.Configuration;
import org.springframework.transaction.PlatformTransactionManager;

@Configuration
public class PipelineConfiguration {

    @Bean
    public ItemReader<RecordAggregator.Sale> salesReader(
            @Value(\"${pipeline.input-file}\") String inputFile) throws Exception {
        Reader reader = new FileReader(inputFile);
        Iterator<CSVRecord> records = CSVFormat.DEFAULT.builder()
                .setHeader()
                .setSkipHeaderRecord(true)
                .build()
                .parse(reader)
                .iterator();
        return () -> records.hasNext()
                ? toSale(records.next())
                : null;
    }

    private static RecordAggregator.Sale toSale(CSVRecord record) {
        return new RecordAggregator.Sale(record.get(\"category\"), new BigDecimal(record.get(\"amount\")));
    }

    @Bean
    public Step aggregateStep(
            JobRepository repository,
            PlatformTransactionManager transactions,
            ItemReader<RecordAggregator.Sale> salesReader,
            RecordAggregator aggregator,
            @Value(\"${pipeline.chunk-size}\") int chunkSize) {
        return new StepBuilder(\"aggregate\", repository)
                .<RecordAggregator.Sale, RecordAggregator.Sale>chunk(chunkSize, transactions)
                .reader(salesReader)
                .writer(chunk -> chunk.forEach(aggregator::add))
                .build();
    }

    @Bean
    public Job dailyMetricsJob(JobRepository repository, Step aggregateStep) {
        return new JobBuilder(\"{{PROJECT_NAME}}-daily\", repository)
                .start(aggregateStep)
                .build();
    }
}
",
            ),
        )
        .source(
            test_java(PKG, "RecordAggregatorTests"),
            TemplateContent::parameterized(
                "package {{PACKAGE}};

import static org.junit.jupiter.api.Assertions.assertEquals;

import java.math.BigDecimal;

import org.junit.jupiter.api.Test;

class RecordAggregatorTests {

    @Test
    void sumsPerCategory() {
        RecordAggregator aggregator = new RecordAggregator();
        aggregator.add(new RecordAggregator.Sale(\"books\", new BigDecimal(\"10.50\")));
        aggregator.add(new RecordAggregator.Sale(\"books\", new BigDecimal(\"4.50\")));
        aggregator.add(new RecordAggregator.Sale(\"games\", new BigDecimal(\"20\")));

        assertEquals(new BigDecimal(\"15.00\"), aggregator.snapshot().get(\"books\"));
        assertEquals(new BigDecimal(\"20\"), aggregator.snapshot().get(\"games\"));
    }
}
",
            ),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use stencil_core::domain::{DomainValidator, LicenseHeader, Platform, RunContext, TextTool};

    use super::*;

    fn context() -> RunContext {
        RunContext::new("17", "3.9.6", TextTool::Sed, Platform::Linux, "/out")
    }

    #[test]
    fn five_blueprints_in_fixed_order() {
        let names: Vec<_> = all()
            .unwrap()
            .iter()
            .map(|bp| bp.name().to_string())
            .collect();
        assert_eq!(names, NAMES);
    }

    #[test]
    fn blueprint_set_is_valid() {
        assert!(DomainValidator::validate_blueprint_set(&all().unwrap()).is_ok());
    }

    #[test]
    fn every_placeholder_resolves() {
        for bp in all().unwrap() {
            let params = context().params_for(&bp);
            if let Err(e) = DomainValidator::validate_placeholders(&bp, &params) {
                panic!("{}: {}", bp.name(), e);
            }
        }
    }

    #[test]
    fn each_blueprint_has_entry_point_config_and_test() {
        for bp in all().unwrap() {
            let pkg = bp.package_path();
            let paths: Vec<String> = bp.files().iter().map(|f| f.path().to_slash_string()).collect();

            assert!(
                paths.iter().any(|p| p.starts_with(&format!("src/main/java/{pkg}/")) && p.ends_with("Application.java")),
                "{} has no entry point",
                bp.name()
            );
            assert!(paths.contains(&"src/main/resources/application.yml".to_string()));
            assert!(
                paths.iter().any(|p| p.starts_with(&format!("src/test/java/{pkg}/"))),
                "{} has no test",
                bp.name()
            );
        }
    }

    #[test]
    fn entry_point_class_matches_file_name() {
        for bp in all().unwrap() {
            let params = context().params_for(&bp);
            let entry = bp
                .files()
                .iter()
                .find(|f| f.path().to_slash_string().ends_with("Application.java"))
                .unwrap();
            let class = format!("{}Application", params.get("PROJECT_NAME_PASCAL").unwrap());
            assert!(entry.path().to_slash_string().ends_with(&format!("{class}.java")));
            assert!(entry.content().render(&params).contains(&format!("public class {class}")));
        }
    }

    #[test]
    fn java_sources_request_header_and_others_do_not() {
        for bp in all().unwrap() {
            for file in bp.files() {
                let is_java = file.path().to_slash_string().ends_with(".java");
                assert_eq!(file.license_header(), is_java, "{}", file.path());
            }
        }
    }

    #[test]
    fn templates_never_embed_the_header() {
        let header = LicenseHeader::apache2();
        for bp in all().unwrap() {
            for file in bp.files() {
                assert_eq!(header.occurrences(file.content().source()), 0);
            }
        }
    }

    #[test]
    fn every_dependency_has_full_coordinates() {
        for bp in all().unwrap() {
            assert!(!bp.dependencies().is_empty());
            for dep in bp.dependencies() {
                for key in ["groupId", "artifactId", "version", "scope"] {
                    assert!(dep.get(key).is_some(), "{}: {dep} lacks {key}", bp.name());
                }
            }
        }
    }
}
